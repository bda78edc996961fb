//! Product entity - A single physical item identified by a caller-assigned id.
//!
//! Products are created by an inbound movement with status `in_stock` and retired by an
//! outbound movement. They are never deleted, and their status never returns to
//! `in_stock`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Checked in and available
    #[sea_orm(string_value = "in_stock")]
    InStock,
    /// Checked out; terminal
    #[sea_orm(string_value = "out_of_stock")]
    OutOfStock,
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InStock => "in_stock",
            Self::OutOfStock => "out_of_stock",
        })
    }
}

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Caller-assigned identifier (e.g. a barcode)
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: String,
    /// Type of the product
    pub type_id: i32,
    /// Optional manufacturing or purchase lot
    pub lot_number: Option<String>,
    /// Document number of the inbound movement that created the product
    pub inbound_number: String,
    /// Current lifecycle status
    pub status: ProductStatus,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one type
    #[sea_orm(
        belongs_to = "super::product_type::Entity",
        from = "Column::TypeId",
        to = "super::product_type::Column::Id"
    )]
    ProductType,
    /// A product has at most one PC detail row
    #[sea_orm(has_one = "super::pc_detail::Entity")]
    PcDetail,
}

impl Related<super::product_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductType.def()
    }
}

impl Related<super::pc_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PcDetail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
