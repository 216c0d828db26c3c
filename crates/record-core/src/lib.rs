//! Core record types for seed-loader.
//!
//! This crate provides the types shared between the storage layer and the
//! loader:
//!
//! - [`FieldValue`] - Dynamically typed field values as supplied by callers
//! - [`Record`] - A field mapping describing one candidate row
//! - [`Entity`] - Validation of a record into a typed [`User`], [`Product`] or [`Order`]
//! - [`ValidationError`] - Why a record was rejected
//!
//! # Example
//!
//! ```rust
//! use record_core::{Entity, Record, User};
//!
//! let record = Record::builder()
//!     .field("id", 1)
//!     .field("name", "Alice")
//!     .field("email", "alice@example.com")
//!     .build();
//!
//! let user = User::from_record(&record).unwrap();
//! assert_eq!(user.name, "Alice");
//! ```

pub mod entity;
pub mod record;
pub mod values;

pub use entity::{Entity, EntityKind, Order, Product, User, ValidationError, Violation};
pub use record::{Record, RecordBuilder, ID_FIELD};
pub use values::FieldValue;
