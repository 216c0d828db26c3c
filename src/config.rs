//! Loader configuration.

use record_core::EntityKind;
use sqlite_store::{StoreArgs, StoreLocation, StoreOptions};
use std::path::PathBuf;

/// Configuration for a load run.
///
/// Controls where each store keeps its table and how connections behave.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Directory for the database files.
    ///
    /// Each entity kind gets its own file named after its table:
    /// `users.db`, `products.db`, `orders.db`.
    pub data_dir: PathBuf,

    /// Keep all stores in memory. When `true`, `data_dir` is ignored.
    pub in_memory: bool,

    /// Connection settings applied to every store.
    pub store_options: StoreOptions,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            in_memory: false,
            store_options: StoreOptions::default(),
        }
    }
}

impl LoaderConfig {
    /// Create a config writing database files into `data_dir`.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Create a config that keeps every store in memory.
    pub fn in_memory() -> Self {
        Self {
            in_memory: true,
            ..Self::default()
        }
    }

    /// Backing database for the store of `kind`.
    pub fn location(&self, kind: EntityKind) -> StoreLocation {
        if self.in_memory {
            StoreLocation::Memory
        } else {
            StoreLocation::in_dir(&self.data_dir, kind)
        }
    }
}

impl From<&StoreArgs> for LoaderConfig {
    fn from(args: &StoreArgs) -> Self {
        Self {
            data_dir: args.data_dir.clone(),
            in_memory: args.in_memory,
            store_options: args.options(),
        }
    }
}
