//! Staff business logic - registering, listing, and removing staff members.
//!
//! Deletion is permissive: ledger rows that reference a removed staff member keep their
//! `staff_id`, and history views show the staff as unknown.

use crate::{
    config::settings::StaffSeed,
    entities::{Staff, StaffColumn, staff},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use tracing::info;

/// Lists all staff members ordered by id.
pub async fn get_all_staff(db: &DatabaseConnection) -> Result<Vec<staff::Model>> {
    Staff::find()
        .order_by_asc(StaffColumn::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a staff member by exact name.
pub async fn get_staff_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<staff::Model>> {
    Staff::find()
        .filter(StaffColumn::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fetches a staff member, failing with [`Error::NotFound`] when missing.
pub async fn require_staff<C>(db: &C, staff_id: i32) -> Result<staff::Model>
where
    C: ConnectionTrait,
{
    Staff::find_by_id(staff_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Staff",
            key: staff_id.to_string(),
        })
}

/// Registers a new staff member.
///
/// # Errors
/// Returns a validation error when the name is blank.
pub async fn create_staff(db: &DatabaseConnection, name: &str) -> Result<staff::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("Staff name cannot be empty"));
    }

    let created = staff::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(staff_id = created.id, name, "Registered staff member");
    Ok(created)
}

/// Registers the configured staff members that do not exist yet. Returns how many were added.
pub async fn seed_staff(db: &DatabaseConnection, seeds: &[StaffSeed]) -> Result<usize> {
    let mut created = 0;
    for seed in seeds {
        if get_staff_by_name(db, seed.name.trim()).await?.is_none() {
            create_staff(db, &seed.name).await?;
            created += 1;
        }
    }
    Ok(created)
}

/// Removes a staff member. Historical ledger rows are left untouched.
pub async fn delete_staff(db: &DatabaseConnection, staff_id: i32) -> Result<staff::Model> {
    let existing = require_staff(db, staff_id).await?;
    Staff::delete_by_id(staff_id).exec(db).await?;
    info!(staff_id, "Deleted staff member");
    Ok(existing)
}
