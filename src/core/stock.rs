//! Stock status transitions and availability checks.
//!
//! Retiring a range is a single conditional `UPDATE ... RETURNING`: only rows that are
//! still `in_stock` when the statement runs are flipped, so two concurrent outbound
//! requests over overlapping ranges can never both retire the same item.

use super::catalog::category_type_ids;
use crate::{
    entities::{Category, Product, ProductColumn, ProductStatus, ProductType, product},
    errors::{Error, Result},
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tracing::info;

/// Retires every in-stock product of `type_id` (within `category`) whose identifier lies in
/// `[start_id, end_id]`, returning the identifiers actually changed in ascending order.
///
/// # Errors
/// Returns [`Error::EmptyRange`] when no row qualified.
pub async fn transition<C>(
    db: &C,
    category: Category,
    type_id: i32,
    start_id: &str,
    end_id: &str,
) -> Result<Vec<String>>
where
    C: ConnectionTrait,
{
    let retired = Product::update_many()
        .set(product::ActiveModel {
            status: Set(ProductStatus::OutOfStock),
            updated_at: Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        })
        .filter(ProductColumn::TypeId.eq(type_id))
        .filter(ProductColumn::TypeId.in_subquery(category_type_ids(category)))
        .filter(ProductColumn::ProductId.gte(start_id))
        .filter(ProductColumn::ProductId.lte(end_id))
        .filter(ProductColumn::Status.eq(ProductStatus::InStock))
        .exec_with_returning(db)
        .await?;

    if retired.is_empty() {
        return Err(Error::EmptyRange {
            start_id: start_id.to_string(),
            end_id: end_id.to_string(),
        });
    }

    let mut product_ids: Vec<String> = retired.into_iter().map(|p| p.product_id).collect();
    product_ids.sort();

    info!(
        %category,
        type_id,
        start_id,
        end_id,
        count = product_ids.len(),
        "Retired products"
    );
    Ok(product_ids)
}

/// Outcome of checking whether a product can be checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// No product with that identifier exists
    Unknown,
    /// The product exists but was already checked out
    Retired,
    /// The product is in stock but belongs to another category
    WrongCategory,
    /// The product is in stock in the requested category
    Available {
        /// Display name of the product's type
        type_name: String,
    },
}

impl Availability {
    /// Whether the product can be used as an outbound boundary
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    /// Human-readable explanation for staff
    #[must_use]
    pub fn message(&self, product_id: &str) -> String {
        match self {
            Self::Unknown => format!("Product ID '{product_id}' does not exist"),
            Self::Retired => format!("Product ID '{product_id}' has already been checked out"),
            Self::WrongCategory => {
                format!("Product ID '{product_id}' belongs to a different category")
            }
            Self::Available { type_name } => {
                format!("Product ID '{product_id}' ({type_name}) is in stock")
            }
        }
    }
}

/// Reports whether `product_id` is an in-stock item of `category`.
///
/// Read-only; the answer may be stale by the time an outbound request runs.
pub async fn check_availability<C>(
    db: &C,
    category: Category,
    product_id: &str,
) -> Result<Availability>
where
    C: ConnectionTrait,
{
    let Some((product, product_type)) = Product::find_by_id(product_id.to_string())
        .find_also_related(ProductType)
        .one(db)
        .await?
    else {
        return Ok(Availability::Unknown);
    };

    if product.status != ProductStatus::InStock {
        return Ok(Availability::Retired);
    }

    match product_type {
        Some(product_type) if product_type.category == category => Ok(Availability::Available {
            type_name: product_type.name,
        }),
        _ => Ok(Availability::WrongCategory),
    }
}
