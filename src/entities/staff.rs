//! Staff entity - People who perform inbound and outbound movements.
//!
//! Ledger rows keep a plain `staff_id` without a foreign key, so deleting a staff member
//! leaves historical rows pointing at a missing id.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Staff database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    /// Unique identifier for the staff member
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Display name
    pub name: String,
    /// When the staff member was registered
    pub created_at: DateTimeUtc,
}

/// Staff has no enforced relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
