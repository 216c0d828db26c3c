//! Error types for the SQLite stores.

use crate::location::StoreLocation;
use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors that can occur while opening or writing to a store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database could not be opened.
    #[error("Failed to open store at {location}: {source}")]
    Open {
        location: StoreLocation,
        source: rusqlite::Error,
    },

    /// The table could not be dropped and recreated.
    #[error("Failed to initialize table '{table}': {source}")]
    Initialize {
        table: &'static str,
        source: rusqlite::Error,
    },

    /// SQLite rejected a statement.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A writer panicked while holding the store lock.
    #[error("Lock for table '{0}' is poisoned")]
    LockPoisoned(&'static str),

    /// IO error while preparing the data directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether this is a constraint violation such as a duplicate primary key.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::Sqlite(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation
        )
    }

    /// Whether this error happened while bringing the store up.
    pub fn is_startup_error(&self) -> bool {
        matches!(
            self,
            StoreError::Open { .. } | StoreError::Initialize { .. } | StoreError::Io(_)
        )
    }
}
