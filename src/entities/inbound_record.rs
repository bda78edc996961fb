//! Inbound ledger entity - One append-only row per product checked in.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inbound record database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inbound_records")]
pub struct Model {
    /// Unique identifier for the ledger row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product that was checked in
    pub product_id: String,
    /// Staff member who performed the movement
    pub staff_id: i32,
    /// Shared document number of the inbound batch (`YYYYMMDD-NNNN`)
    pub inbound_number: String,
    /// Business date of the movement
    pub inbound_date: Date,
    /// When the row was written
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `InboundRecord` and other entities
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
