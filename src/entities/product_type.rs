//! Product type entity - A specific model or kind of item within a category.
//!
//! Every product references exactly one type, and the type's category partitions all
//! range lookups. Types are immutable once a product references them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Top-level product grouping. Closed set, validated at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Personal computers
    #[sea_orm(string_value = "pc")]
    Pc,
    /// Safety vests
    #[sea_orm(string_value = "vest")]
    Vest,
}

impl Category {
    /// Stored representation of the category
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pc => "pc",
            Self::Vest => "vest",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = crate::errors::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pc" => Ok(Self::Pc),
            "vest" => Ok(Self::Vest),
            other => Err(crate::errors::Error::validation(format!(
                "unknown category '{other}' (expected 'pc' or 'vest')"
            ))),
        }
    }
}

/// Product type database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_types")]
pub struct Model {
    /// Unique identifier for the type
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Category this type belongs to
    pub category: Category,
    /// Display name (e.g. "ThinkPad X1 Carbon", "High-visibility vest L")
    pub name: String,
    /// When the type was created
    pub created_at: DateTime,
}

/// Defines relationships between `ProductType` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One type has many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("pc".parse::<Category>().unwrap(), Category::Pc);
        assert_eq!(" Vest ".parse::<Category>().unwrap(), Category::Vest);
        assert!("laptop".parse::<Category>().is_err());
        assert_eq!(Category::Pc.to_string(), "pc");
    }
}
