//! Range resolution for outbound movements.
//!
//! Before a range of products is retired, both boundary identifiers must be in stock in the
//! requested category and must share one product type. Identifiers are opaque strings, so
//! the shared type id is what scopes the bulk status transition afterwards.

use crate::{
    entities::{
        Category, Product, ProductColumn, ProductStatus, ProductType, ProductTypeColumn,
        product_type,
    },
    errors::{Error, Result},
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use tracing::debug;

/// The product type shared by both ends of an outbound range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRange {
    /// Shared type id
    pub type_id: i32,
    /// Display name of the shared type
    pub type_name: String,
}

/// Looks up the type of the in-stock product `product_id` within `category`.
///
/// Fails with [`Error::RangeBoundaryNotFound`] when the id is unknown, already retired, or
/// belongs to another category.
pub async fn resolve_boundary<C>(
    db: &C,
    category: Category,
    product_id: &str,
) -> Result<product_type::Model>
where
    C: ConnectionTrait,
{
    let found = Product::find_by_id(product_id.to_string())
        .filter(ProductColumn::Status.eq(ProductStatus::InStock))
        .find_also_related(ProductType)
        .filter(ProductTypeColumn::Category.eq(category))
        .one(db)
        .await?;

    match found {
        Some((_, Some(product_type))) => Ok(product_type),
        _ => Err(Error::RangeBoundaryNotFound {
            product_id: product_id.to_string(),
            category: category.to_string(),
        }),
    }
}

/// Resolves and validates both boundaries of an outbound range.
///
/// `start_id == end_id` denotes a single item. Lexical order of the two ids is not checked.
pub async fn resolve_range<C>(
    db: &C,
    category: Category,
    start_id: &str,
    end_id: &str,
) -> Result<ResolvedRange>
where
    C: ConnectionTrait,
{
    let start_type = resolve_boundary(db, category, start_id).await?;
    let end_type = resolve_boundary(db, category, end_id).await?;

    if start_type.id != end_type.id {
        return Err(Error::TypeMismatch {
            start_type: start_type.name,
            end_type: end_type.name,
        });
    }

    debug!(
        %category,
        start_id,
        end_id,
        type_id = start_type.id,
        "Resolved outbound range"
    );

    Ok(ResolvedRange {
        type_id: start_type.id,
        type_name: start_type.name,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_resolve_range_same_type() -> Result<()> {
        let db = setup_test_db().await?;
        let thinkpad = create_test_type(&db, Category::Pc, "ThinkPad").await?;
        insert_test_product(&db, "ABC100", thinkpad.id, "20240101-0001").await?;
        insert_test_product(&db, "ABC103", thinkpad.id, "20240101-0001").await?;

        let resolved = resolve_range(&db, Category::Pc, "ABC100", "ABC103").await?;
        assert_eq!(resolved.type_id, thinkpad.id);
        assert_eq!(resolved.type_name, "ThinkPad");

        // A single-item range is legal
        let single = resolve_range(&db, Category::Pc, "ABC100", "ABC100").await?;
        assert_eq!(single.type_id, thinkpad.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_range_type_mismatch_names_both_types() -> Result<()> {
        let db = setup_test_db().await?;
        let thinkpad = create_test_type(&db, Category::Pc, "ThinkPad").await?;
        let latitude = create_test_type(&db, Category::Pc, "Latitude").await?;
        insert_test_product(&db, "ABC100", thinkpad.id, "20240101-0001").await?;
        insert_test_product(&db, "ABC105", latitude.id, "20240101-0001").await?;

        let result = resolve_range(&db, Category::Pc, "ABC100", "ABC105").await;
        match result {
            Err(Error::TypeMismatch {
                start_type,
                end_type,
            }) => {
                assert_eq!(start_type, "ThinkPad");
                assert_eq!(end_type, "Latitude");
            }
            other => panic!("expected type mismatch, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_boundary_not_found_cases() -> Result<()> {
        let db = setup_test_db().await?;
        let thinkpad = create_test_type(&db, Category::Pc, "ThinkPad").await?;
        let vest = create_test_type(&db, Category::Vest, "Mesh vest").await?;
        insert_test_product(&db, "PC-1", thinkpad.id, "20240101-0001").await?;
        insert_test_product(&db, "V-1", vest.id, "20240101-0001").await?;
        retire_test_product(&db, "PC-1").await?;

        // Unknown id
        assert!(matches!(
            resolve_boundary(&db, Category::Pc, "NOPE").await,
            Err(Error::RangeBoundaryNotFound { .. })
        ));
        // Already retired
        assert!(matches!(
            resolve_boundary(&db, Category::Pc, "PC-1").await,
            Err(Error::RangeBoundaryNotFound { .. })
        ));
        // Wrong category
        assert!(matches!(
            resolve_boundary(&db, Category::Pc, "V-1").await,
            Err(Error::RangeBoundaryNotFound { .. })
        ));
        // Right category
        let found = resolve_boundary(&db, Category::Vest, "V-1").await?;
        assert_eq!(found.id, vest.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_end_boundary_reports_end_id() -> Result<()> {
        let db = setup_test_db().await?;
        let thinkpad = create_test_type(&db, Category::Pc, "ThinkPad").await?;
        insert_test_product(&db, "ABC100", thinkpad.id, "20240101-0001").await?;

        let err = resolve_range(&db, Category::Pc, "ABC100", "ABC105")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::RangeBoundaryNotFound { ref product_id, .. } if product_id == "ABC105"
        ));
        Ok(())
    }
}
