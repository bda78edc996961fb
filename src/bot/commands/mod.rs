//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Product type and PC model number management commands
pub mod catalog;

/// General utility commands
pub mod general;

/// Stock listing, history, and dashboard commands
pub mod inventory;

/// Inbound and outbound movement commands
pub mod movement;

/// Staff management commands
pub mod staff;

// Export commands
pub use catalog::*;
pub use general::*;
pub use inventory::*;
pub use movement::*;
pub use staff::*;

use crate::{
    bot::{BotData, input},
    core::{catalog::get_product_type_by_name, staff::get_staff_by_name},
    entities::{Category, product_type, staff as staff_entity},
    errors::{Error, ErrorKind, Result},
};
use sea_orm::DatabaseConnection;
use tracing::{error, warn};

/// Most rows listed in a single reply
pub(crate) const MAX_LISTED_ROWS: usize = 20;

/// Tells the user why a command failed. Storage failures are logged as errors.
pub(crate) async fn reply_error(
    ctx: poise::Context<'_, BotData, Error>,
    err: &Error,
) -> Result<()> {
    if err.kind() == ErrorKind::Storage {
        error!(command = %ctx.command().name, error = ?err, "Command failed");
    } else {
        warn!(command = %ctx.command().name, error = %err, "Command rejected");
    }
    ctx.say(input::error_message(err)).await?;
    Ok(())
}

/// Looks up a staff member by display name.
pub(crate) async fn resolve_staff(
    db: &DatabaseConnection,
    name: &str,
) -> Result<staff_entity::Model> {
    get_staff_by_name(db, name.trim())
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Staff",
            key: name.trim().to_string(),
        })
}

/// Looks up a product type by display name within `category`.
pub(crate) async fn resolve_product_type(
    db: &DatabaseConnection,
    category: Category,
    name: &str,
) -> Result<product_type::Model> {
    get_product_type_by_name(db, category, name.trim())
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Product type",
            key: format!("{} ({category})", name.trim()),
        })
}

/// Joins ids into a short list, noting how many were left out.
pub(crate) fn summarize_ids(ids: &[String]) -> String {
    let shown = ids.iter().take(MAX_LISTED_ROWS).cloned().collect::<Vec<_>>().join(", ");
    if ids.len() > MAX_LISTED_ROWS {
        format!("{shown} … and {} more", ids.len() - MAX_LISTED_ROWS)
    } else {
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_ids_truncates() {
        let ids: Vec<String> = (0..25).map(|i| format!("PC-{i}")).collect();
        let summary = summarize_ids(&ids);
        assert!(summary.starts_with("PC-0, PC-1"));
        assert!(summary.ends_with("and 5 more"));
        assert_eq!(summarize_ids(&ids[..2]), "PC-0, PC-1");
    }
}
