//! PC detail entity - Hardware details captured when a PC is checked in.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// PC detail database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pc_details")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product the details belong to
    #[sea_orm(unique)]
    pub product_id: String,
    /// Manufacturer model number
    pub model_number: String,
    /// Manufacturer serial number
    pub serial_number: String,
    /// Purchase date, if known
    pub purchase_date: Option<Date>,
    /// Warranty period in months, if known
    pub warranty_period: Option<i32>,
}

/// Defines relationships between `PcDetail` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each detail row belongs to one product
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
