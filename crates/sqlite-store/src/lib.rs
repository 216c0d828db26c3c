//! SQLite-backed entity stores.
//!
//! Each [`EntityStore`] owns one table in its own database (a file such as
//! `users.db`, or an in-memory database) and guards its connection with its
//! own mutex. Opening a store drops and recreates its table.
//!
//! # Example
//!
//! ```ignore
//! use record_core::{Record, User};
//! use sqlite_store::{EntityStore, StoreLocation, StoreOptions};
//!
//! let store = EntityStore::<User>::open(StoreLocation::Memory, &StoreOptions::default())?;
//! let outcome = store.insert(&record);
//! assert!(outcome.is_inserted());
//! ```

pub mod args;
mod error;
mod location;
pub mod schema;
mod store;

pub use args::StoreArgs;
pub use error::StoreError;
pub use location::{StoreLocation, StoreOptions, DEFAULT_BUSY_TIMEOUT};
pub use schema::{Column, SqliteEntity, SqliteType};
pub use store::{EntityStore, InsertOutcome};
