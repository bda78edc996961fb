//! Catalog business logic - product types and PC model numbers.
//!
//! Product types partition the inventory by category; PC model numbers are a registry of
//! known hardware models offered when checking PCs in.

use crate::{
    config::settings::ProductTypeSeed,
    entities::{
        Category, PcDetail, PcDetailColumn, PcModelNumber, PcModelNumberColumn, ProductType,
        ProductTypeColumn, pc_model_number, product_type,
    },
    errors::{Error, Result},
};
use sea_orm::{
    ConnectionTrait, PaginatorTrait, QueryOrder, QuerySelect, QueryTrait, Set, prelude::*,
    sea_query::SelectStatement,
};
use tracing::info;

/// Subquery selecting the ids of every product type in `category`.
pub(crate) fn category_type_ids(category: Category) -> SelectStatement {
    ProductType::find()
        .select_only()
        .column(ProductTypeColumn::Id)
        .filter(ProductTypeColumn::Category.eq(category))
        .into_query()
}

/// Lists the product types of a category ordered by id.
pub async fn get_product_types(
    db: &DatabaseConnection,
    category: Category,
) -> Result<Vec<product_type::Model>> {
    ProductType::find()
        .filter(ProductTypeColumn::Category.eq(category))
        .order_by_asc(ProductTypeColumn::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a product type by display name within a category.
pub async fn get_product_type_by_name(
    db: &DatabaseConnection,
    category: Category,
    name: &str,
) -> Result<Option<product_type::Model>> {
    ProductType::find()
        .filter(ProductTypeColumn::Category.eq(category))
        .filter(ProductTypeColumn::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fetches a product type that must belong to `category`.
///
/// # Errors
/// Returns [`Error::NotFound`] when the id is unknown or belongs to another category.
pub async fn require_product_type<C>(
    db: &C,
    category: Category,
    type_id: i32,
) -> Result<product_type::Model>
where
    C: ConnectionTrait,
{
    ProductType::find_by_id(type_id)
        .filter(ProductTypeColumn::Category.eq(category))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Product type",
            key: format!("{type_id} ({category})"),
        })
}

/// Creates a product type. Names are unique within a category.
pub async fn create_product_type(
    db: &DatabaseConnection,
    category: Category,
    name: &str,
) -> Result<product_type::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("Product type name cannot be empty"));
    }
    if get_product_type_by_name(db, category, name).await?.is_some() {
        return Err(Error::AlreadyExists {
            entity: "Product type",
            key: name.to_string(),
        });
    }

    let created = product_type::ActiveModel {
        category: Set(category),
        name: Set(name.to_string()),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(type_id = created.id, %category, name, "Created product type");
    Ok(created)
}

/// Creates the configured product types that do not exist yet. Returns how many were added.
pub async fn seed_product_types(
    db: &DatabaseConnection,
    seeds: &[ProductTypeSeed],
) -> Result<usize> {
    let mut created = 0;
    for seed in seeds {
        if get_product_type_by_name(db, seed.category, seed.name.trim())
            .await?
            .is_none()
        {
            create_product_type(db, seed.category, &seed.name).await?;
            created += 1;
        }
    }
    Ok(created)
}

/// Lists registered PC model numbers alphabetically.
pub async fn get_pc_model_numbers(db: &DatabaseConnection) -> Result<Vec<String>> {
    PcModelNumber::find()
        .order_by_asc(PcModelNumberColumn::ModelNumber)
        .all(db)
        .await
        .map(|rows| rows.into_iter().map(|row| row.model_number).collect())
        .map_err(Into::into)
}

/// Registers a PC model number.
pub async fn add_pc_model_number(
    db: &DatabaseConnection,
    model_number: &str,
) -> Result<pc_model_number::Model> {
    let model_number = model_number.trim();
    if model_number.is_empty() {
        return Err(Error::validation("Model number cannot be empty"));
    }

    let existing = PcModelNumber::find()
        .filter(PcModelNumberColumn::ModelNumber.eq(model_number))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::AlreadyExists {
            entity: "Model number",
            key: model_number.to_string(),
        });
    }

    pc_model_number::ActiveModel {
        model_number: Set(model_number.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Removes a PC model number unless a checked-in PC still uses it.
pub async fn delete_pc_model_number(db: &DatabaseConnection, model_number: &str) -> Result<()> {
    let in_use = PcDetail::find()
        .filter(PcDetailColumn::ModelNumber.eq(model_number))
        .count(db)
        .await?;
    if in_use > 0 {
        return Err(Error::InUse {
            entity: "Model number",
            key: model_number.to_string(),
        });
    }

    let result = PcModelNumber::delete_many()
        .filter(PcModelNumberColumn::ModelNumber.eq(model_number))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "Model number",
            key: model_number.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::ledger::{PcDetails, ProductDetails, create_details},
        test_utils::*,
    };

    #[tokio::test]
    async fn test_product_types_are_scoped_by_category() -> Result<()> {
        let db = setup_test_db().await?;
        let thinkpad = create_product_type(&db, Category::Pc, "ThinkPad").await?;
        create_product_type(&db, Category::Vest, "Mesh vest").await?;

        let pcs = get_product_types(&db, Category::Pc).await?;
        assert_eq!(pcs, vec![thinkpad.clone()]);

        assert!(require_product_type(&db, Category::Pc, thinkpad.id).await.is_ok());
        assert!(matches!(
            require_product_type(&db, Category::Vest, thinkpad.id).await,
            Err(Error::NotFound { .. })
        ));

        // Same name in the other category is fine, same category is not
        create_product_type(&db, Category::Vest, "ThinkPad").await?;
        assert!(matches!(
            create_product_type(&db, Category::Pc, "ThinkPad").await,
            Err(Error::AlreadyExists { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_product_types_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let seeds = vec![
            ProductTypeSeed {
                category: Category::Pc,
                name: "ThinkPad".to_string(),
            },
            ProductTypeSeed {
                category: Category::Vest,
                name: "Mesh vest".to_string(),
            },
        ];

        assert_eq!(seed_product_types(&db, &seeds).await?, 2);
        assert_eq!(seed_product_types(&db, &seeds).await?, 0);
        assert_eq!(get_product_types(&db, Category::Pc).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_pc_model_numbers() -> Result<()> {
        let db = setup_test_db().await?;
        add_pc_model_number(&db, "20XW").await?;
        add_pc_model_number(&db, "14AB").await?;
        assert_eq!(get_pc_model_numbers(&db).await?, vec!["14AB", "20XW"]);

        assert!(matches!(
            add_pc_model_number(&db, "20XW").await,
            Err(Error::AlreadyExists { .. })
        ));

        delete_pc_model_number(&db, "14AB").await?;
        assert!(matches!(
            delete_pc_model_number(&db, "14AB").await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_model_number_in_use_cannot_be_deleted() -> Result<()> {
        let db = setup_test_db().await?;
        let pc = create_test_type(&db, Category::Pc, "ThinkPad").await?;
        add_pc_model_number(&db, "20XW").await?;
        insert_test_product(&db, "PC-1", pc.id, "20240101-0001").await?;
        create_details(
            &db,
            "PC-1",
            &ProductDetails::Pc(PcDetails {
                model_number: "20XW".to_string(),
                serial_number: "SN".to_string(),
                purchase_date: None,
                warranty_period: None,
            }),
        )
        .await?;

        assert!(matches!(
            delete_pc_model_number(&db, "20XW").await,
            Err(Error::InUse { .. })
        ));
        Ok(())
    }
}
