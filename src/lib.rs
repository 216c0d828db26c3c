//! seed-loader library
//!
//! Validates user, product and order records and loads them concurrently into
//! three independent SQLite stores.
//!
//! # Overview
//!
//! - [`coordinator::Coordinator`] opens the three stores (dropping and
//!   recreating each table) and runs one loader task per store.
//! - [`loader::load_batch`] inserts one batch in order; rejected or failed
//!   records are counted and skipped.
//! - Validation and storage live in the `record-core` and `sqlite-store`
//!   crates.
//!
//! # CLI Usage
//!
//! ```bash
//! # Load the built-in datasets into ./users.db, ./products.db, ./orders.db
//! seed-loader
//!
//! # Keep everything in memory and print the report as JSON
//! seed-loader --in-memory --summary-json
//!
//! # Only validate
//! seed-loader --dry-run
//! ```

pub mod config;
pub mod coordinator;
pub mod loader;
pub mod sample;

pub use config::LoaderConfig;
pub use coordinator::{Coordinator, Datasets, RunReport};
pub use loader::{load_batch, validate_batch, LoadSummary};
