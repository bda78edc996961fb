//! Application settings loaded from config.toml
//!
//! The settings file declares the product types and staff members to seed into an empty
//! database, plus tuning for the movement engine. Every section is optional.

use crate::errors::{Error, Result};
use crate::entities::Category;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TRANSACTION_TIMEOUT_SECS: u64 = 30;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Movement engine tuning
    #[serde(default)]
    pub engine: EngineSettings,
    /// Product types to seed
    #[serde(default)]
    pub product_types: Vec<ProductTypeSeed>,
    /// Staff members to seed
    #[serde(default)]
    pub staff: Vec<StaffSeed>,
}

/// Movement engine tuning
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EngineSettings {
    /// Deadline for one inbound or outbound movement, after which it is rolled back
    #[serde(default = "default_transaction_timeout_secs")]
    pub transaction_timeout_secs: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            transaction_timeout_secs: DEFAULT_TRANSACTION_TIMEOUT_SECS,
        }
    }
}

const fn default_transaction_timeout_secs() -> u64 {
    DEFAULT_TRANSACTION_TIMEOUT_SECS
}

/// A product type to create on startup if missing
#[derive(Debug, Clone, Deserialize)]
pub struct ProductTypeSeed {
    /// Category of the type
    pub category: Category,
    /// Display name
    pub name: String,
}

/// A staff member to create on startup if missing
#[derive(Debug, Clone, Deserialize)]
pub struct StaffSeed {
    /// Display name
    pub name: String,
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML is invalid, or the engine
/// timeout is zero.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;
    parse_settings(&contents)
}

/// Parses settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if settings.engine.transaction_timeout_secs == 0 {
        return Err(Error::Config {
            message: "engine.transaction_timeout_secs must be greater than zero".to_string(),
        });
    }

    Ok(settings)
}

/// Loads settings from `INVENTORY_CONFIG`, or `./config.toml` when unset.
///
/// A missing default file is not an error; built-in defaults are used instead.
pub fn load_default_settings() -> Result<Settings> {
    if let Ok(path) = std::env::var("INVENTORY_CONFIG") {
        return load_settings(path);
    }

    let default_path = Path::new("config.toml");
    if default_path.exists() {
        load_settings(default_path)
    } else {
        tracing::info!("No config.toml found, using default settings");
        Ok(Settings::default())
    }
}
