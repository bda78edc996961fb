//! Unified error type for the inventory tracker.
//!
//! Every failure the movement engine can report is a variant of [`Error`]. Variants are
//! grouped into the coarse [`ErrorKind`] classification that callers use to decide how to
//! present a failure (bad input, missing record, conflicting state, nothing to do, or a
//! storage problem).

use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input, rejected before touching the store
    Validation,
    /// A referenced product, type, or staff member does not exist (or is not in stock)
    NotFound,
    /// The request conflicts with existing state (type mismatch, duplicate id)
    Conflict,
    /// A well-formed outbound range matched zero eligible items
    EmptyResult,
    /// Connection, constraint, serialization, or timeout failure in the store
    Storage,
}

/// Application error type
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed request input
    #[error("Invalid request: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// An outbound boundary is unknown, already retired, or belongs to another category
    #[error("Product '{product_id}' is not in stock in category '{category}'")]
    RangeBoundaryNotFound {
        /// The boundary identifier that failed to resolve
        product_id: String,
        /// The category of the request
        category: String,
    },

    /// A referenced staff member, product type, or model number does not exist
    #[error("{entity} '{key}' not found")]
    NotFound {
        /// Kind of record that was looked up
        entity: &'static str,
        /// The key used for the lookup
        key: String,
    },

    /// The two range boundaries resolve to different product types
    #[error("Start and end product types do not match (start: {start_type}, end: {end_type})")]
    TypeMismatch {
        /// Display name of the start boundary's type
        start_type: String,
        /// Display name of the end boundary's type
        end_type: String,
    },

    /// An inbound product identifier is already registered (or repeated in the batch)
    #[error("Product '{product_id}' is already registered")]
    DuplicateProduct {
        /// The duplicated identifier
        product_id: String,
    },

    /// A unique value other than a product identifier already exists
    #[error("{entity} '{key}' already exists")]
    AlreadyExists {
        /// Kind of record
        entity: &'static str,
        /// The duplicated key
        key: String,
    },

    /// A record cannot be removed while other rows reference it
    #[error("{entity} '{key}' is in use and cannot be deleted")]
    InUse {
        /// Kind of record
        entity: &'static str,
        /// The referenced key
        key: String,
    },

    /// The per-day document sequence ran past 9999
    #[error("Document sequence for {date} is exhausted")]
    SequenceExhausted {
        /// The date stamp (`YYYYMMDD`) whose namespace is full
        date: String,
    },

    /// No in-stock item of the resolved type lies within the requested range
    #[error("No in-stock products found between '{start_id}' and '{end_id}'")]
    EmptyRange {
        /// Range start (inclusive)
        start_id: String,
        /// Range end (inclusive)
        end_id: String,
    },

    /// The movement did not finish before its deadline and was rolled back
    #[error("Movement timed out after {seconds}s and was rolled back")]
    Timeout {
        /// The configured deadline
        seconds: u64,
    },

    /// Error reported by the database layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Environment variable lookup failed
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Integer conversion failed
    #[error("Integer conversion error: {0}")]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// Formatting a response message failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Error from the Discord framework
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::Config { .. } => ErrorKind::Validation,
            Self::RangeBoundaryNotFound { .. } | Self::NotFound { .. } => ErrorKind::NotFound,
            Self::TypeMismatch { .. }
            | Self::DuplicateProduct { .. }
            | Self::AlreadyExists { .. }
            | Self::InUse { .. }
            | Self::SequenceExhausted { .. } => ErrorKind::Conflict,
            Self::EmptyRange { .. } => ErrorKind::EmptyResult,
            Self::Timeout { .. }
            | Self::Database(_)
            | Self::EnvVar(_)
            | Self::TryFromInt(_)
            | Self::Fmt(_)
            | Self::Framework(_) => ErrorKind::Storage,
        }
    }

    /// Whether resubmitting the same request may succeed.
    ///
    /// Timeouts, serialization failures, deadlocks and busy/locked stores are transient.
    /// The engine never retries by itself.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Database(err) => is_transient_db_error(err),
            _ => false,
        }
    }

    /// Whether an outbound request failed because nothing eligible was left to retire.
    #[must_use]
    pub const fn is_nothing_retired(&self) -> bool {
        matches!(
            self,
            Self::EmptyRange { .. } | Self::RangeBoundaryNotFound { .. }
        )
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

fn is_transient_db_error(err: &sea_orm::DbErr) -> bool {
    use sea_orm::{ConnAcquireErr, DbErr, RuntimeErr};

    match err {
        DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => true,
        DbErr::Conn(RuntimeErr::SqlxError(err))
        | DbErr::Exec(RuntimeErr::SqlxError(err))
        | DbErr::Query(RuntimeErr::SqlxError(err)) => is_transient_sqlx_error(err),
        _ => false,
    }
}

fn is_transient_sqlx_error(err: &sea_orm::sqlx::Error) -> bool {
    match err {
        sea_orm::sqlx::Error::PoolTimedOut => true,
        sea_orm::sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| is_transient_error_code(&code)),
        _ => false,
    }
}

/// SQLSTATE serialization failure and deadlock, or `SQLite` BUSY/LOCKED (extended codes
/// carry the primary code in their low byte).
fn is_transient_error_code(code: &str) -> bool {
    if matches!(code, "40001" | "40P01") {
        return true;
    }
    code.parse::<i32>()
        .is_ok_and(|code| matches!(code & 0xff, 5 | 6))
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
