//! CLI argument definitions for the SQLite stores.

use crate::location::StoreOptions;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// Store arguments, flattened into the loader CLI.
#[derive(Args, Clone, Debug)]
pub struct StoreArgs {
    /// Directory holding users.db, products.db and orders.db
    #[arg(long, env = "SEED_LOADER_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Keep every store in memory instead of writing database files
    #[arg(long)]
    pub in_memory: bool,

    /// Busy timeout for SQLite connections, in milliseconds
    #[arg(long, default_value = "5000")]
    pub busy_timeout_ms: u64,
}

impl StoreArgs {
    /// Connection options derived from the arguments.
    pub fn options(&self) -> StoreOptions {
        StoreOptions {
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
        }
    }
}
