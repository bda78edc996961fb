//! Shared test utilities for the inventory tracker.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    entities::{Category, Product, ProductStatus, inbound_record, product, product_type, staff},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Registers a staff member.
pub async fn create_test_staff(db: &DatabaseConnection, name: &str) -> Result<staff::Model> {
    staff::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a product type in `category`.
pub async fn create_test_type(
    db: &DatabaseConnection,
    category: Category,
    name: &str,
) -> Result<product_type::Model> {
    product_type::ActiveModel {
        category: Set(category),
        name: Set(name.to_string()),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Inserts an in-stock product directly, bypassing the movement engine.
///
/// # Defaults
/// * `lot_number`: None
/// * `status`: `in_stock`
pub async fn insert_test_product(
    db: &DatabaseConnection,
    product_id: &str,
    type_id: i32,
    inbound_number: &str,
) -> Result<product::Model> {
    let now = chrono::Utc::now().naive_utc();
    product::ActiveModel {
        product_id: Set(product_id.to_string()),
        type_id: Set(type_id),
        lot_number: Set(None),
        inbound_number: Set(inbound_number.to_string()),
        status: Set(ProductStatus::InStock),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Writes an inbound ledger row dated 2024-01-01 for an existing product.
pub async fn insert_test_inbound_record(
    db: &DatabaseConnection,
    product_id: &str,
    staff_id: i32,
    inbound_number: &str,
) -> Result<inbound_record::Model> {
    inbound_record::ActiveModel {
        product_id: Set(product_id.to_string()),
        staff_id: Set(staff_id),
        inbound_number: Set(inbound_number.to_string()),
        inbound_date: Set(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Marks a product as out of stock.
pub async fn retire_test_product(db: &DatabaseConnection, product_id: &str) -> Result<()> {
    if let Some(existing) = Product::find_by_id(product_id.to_string()).one(db).await? {
        let mut active: product::ActiveModel = existing.into();
        active.status = Set(ProductStatus::OutOfStock);
        active.update(db).await?;
    }
    Ok(())
}

/// Fetches the current status of a product, or `None` if it does not exist.
pub async fn product_status(
    db: &DatabaseConnection,
    product_id: &str,
) -> Result<Option<ProductStatus>> {
    Ok(Product::find_by_id(product_id.to_string())
        .one(db)
        .await?
        .map(|p| p.status))
}
