//! PC model number entity - Registry of known PC model numbers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// PC model number database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pc_model_numbers")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The model number string
    #[sea_orm(unique)]
    pub model_number: String,
    /// When it was registered
    pub created_at: DateTimeUtc,
}

/// `PcModelNumber` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
