//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the inventory tracker, including all slash
//! commands, autocomplete handlers, input parsing, and bot startup.

/// Discord command implementations (movement, inventory, staff, catalog, general)
pub mod commands;
/// Framework setup and the bot run loop
pub mod framework;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Parsing of free-form command arguments and user-facing error messages
pub mod input;

use crate::core::movement::MovementEngine;
use sea_orm::DatabaseConnection;

/// Shared data available to all bot commands.
/// This structure holds the movement engine, which owns the database connection.
pub struct BotData {
    /// Engine that runs inbound and outbound movements
    pub engine: MovementEngine,
}

impl BotData {
    /// Creates a new `BotData` instance from the movement engine.
    #[must_use]
    pub const fn new(engine: MovementEngine) -> Self {
        Self { engine }
    }

    /// Connection used for reads and reference data
    #[must_use]
    pub const fn database(&self) -> &DatabaseConnection {
        self.engine.database()
    }
}

pub use commands::*;
pub use framework::run_bot;
pub use handlers::*;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::staff, test_utils::*};
    use std::time::Duration;

    #[tokio::test]
    async fn test_bot_data_reads_through_engine_connection() {
        let db = setup_test_db().await.unwrap();
        create_test_staff(&db, "Alice").await.unwrap();

        let data = BotData::new(MovementEngine::new(db, Duration::from_secs(5)));
        let members = staff::get_all_staff(data.database()).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Alice");
    }
}
