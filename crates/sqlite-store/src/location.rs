//! Where a store keeps its table.

use record_core::EntityKind;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default busy timeout applied to every connection.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Backing database for a single store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// A database file on disk.
    File(PathBuf),
    /// A private in-memory database, gone when the store is dropped.
    Memory,
}

impl StoreLocation {
    /// The database file for `kind` inside `dir`, e.g. `dir/users.db`.
    pub fn in_dir(dir: impl AsRef<Path>, kind: EntityKind) -> Self {
        StoreLocation::File(dir.as_ref().join(format!("{}.db", kind.table_name())))
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreLocation::File(path) => write!(f, "{}", path.display()),
            StoreLocation::Memory => write!(f, ":memory:"),
        }
    }
}

/// Connection settings shared by all stores.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_in_dir() {
        let location = StoreLocation::in_dir("/tmp/data", EntityKind::Product);
        assert_eq!(
            location,
            StoreLocation::File(PathBuf::from("/tmp/data/products.db"))
        );
        assert_eq!(location.to_string(), "/tmp/data/products.db");
        assert_eq!(StoreLocation::Memory.to_string(), ":memory:");
    }
}
