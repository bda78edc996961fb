//! Vest detail entity - Attributes captured when a safety vest is checked in.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vest detail database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vest_details")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product the details belong to
    #[sea_orm(unique)]
    pub product_id: String,
    /// Vest style (e.g. "mesh", "winter")
    pub vest_type: String,
    /// Size label
    pub size: String,
    /// Whether the company logo is printed
    pub has_logo: bool,
}

/// Defines relationships between `VestDetail` and other entities
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
