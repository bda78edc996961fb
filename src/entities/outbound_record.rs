//! Outbound ledger entity - One append-only row per product checked out.
//!
//! Customer and purchaser fields are optional free text copied from the request.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Outbound record database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "outbound_records")]
pub struct Model {
    /// Unique identifier for the ledger row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product that was checked out
    pub product_id: String,
    /// Staff member who performed the movement
    pub staff_id: i32,
    /// Shared document number of the outbound batch (`YYYYMMDD-NNNN`)
    pub outbound_number: String,
    /// Business date of the movement
    pub outbound_date: Date,
    /// Customer number, if recorded
    pub customer_number: Option<String>,
    /// Customer name, if recorded
    pub customer_name: Option<String>,
    /// Purchaser number, if recorded
    pub purchaser_number: Option<String>,
    /// Purchaser name, if recorded
    pub purchaser_name: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// When the row was written
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `OutboundRecord` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each record refers to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::ProductId"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
