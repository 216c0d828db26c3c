//! Entity kinds and their validation rules.
//!
//! Each entity kind converts a loosely typed [`Record`] into a typed value.
//! Conversion is the validation: a record that converts is accepted, one that
//! does not yields a [`ValidationError`] naming the first offending field.
//!
//! The rules are intentionally lenient beyond field presence and type. A
//! negative price, a zero or negative quantity, and an order pointing at a
//! product that was never loaded are all accepted.

use crate::record::{Record, ID_FIELD};
use crate::values::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The closed set of entity kinds the loader knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Product,
    Order,
}

impl EntityKind {
    /// All kinds, in load order.
    pub const ALL: [EntityKind; 3] = [EntityKind::User, EntityKind::Product, EntityKind::Order];

    /// Table backing this kind.
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Product => "products",
            EntityKind::Order => "orders",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => write!(f, "user"),
            EntityKind::Product => write!(f, "product"),
            EntityKind::Order => write!(f, "order"),
        }
    }
}

/// What was wrong with a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The field is absent from the record.
    Missing,
    /// The field is present but null.
    Null,
    /// The field is an empty string.
    Empty,
    /// The field holds a value of the wrong type.
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing => write!(f, "field is missing"),
            Violation::Null => write!(f, "cannot be null"),
            Violation::Empty => write!(f, "cannot be empty"),
            Violation::WrongType { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
        }
    }
}

/// A record was rejected before reaching storage.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid {field} for {kind} ID {} ({violation})", display_id(.id))]
pub struct ValidationError {
    /// Kind the record was validated as.
    pub kind: EntityKind,
    /// The record's raw id, if it had one.
    pub id: Option<FieldValue>,
    /// Offending field.
    pub field: &'static str,
    /// What was wrong with it.
    pub violation: Violation,
}

fn display_id(id: &Option<FieldValue>) -> String {
    match id {
        Some(value) => value.to_string(),
        None => "<unknown>".to_string(),
    }
}

/// A typed entity that can be built from a [`Record`].
///
/// Implemented by [`User`], [`Product`] and [`Order`]. Stores are generic over
/// this trait so the validator for each kind is selected at compile time.
pub trait Entity: Sized {
    /// Kind of this entity.
    const KIND: EntityKind;

    /// Primary key.
    fn id(&self) -> i64;

    /// Validate `record` and convert it into a typed entity.
    fn from_record(record: &Record) -> Result<Self, ValidationError>;

    /// Validate `record` without keeping the converted entity.
    fn validate(record: &Record) -> Result<(), ValidationError> {
        Self::from_record(record).map(|_| ())
    }
}

/// Per-record field extraction that produces kind-aware errors.
struct FieldCheck<'a> {
    kind: EntityKind,
    record: &'a Record,
}

impl<'a> FieldCheck<'a> {
    fn new(kind: EntityKind, record: &'a Record) -> Self {
        Self { kind, record }
    }

    fn reject(&self, field: &'static str, violation: Violation) -> ValidationError {
        ValidationError {
            kind: self.kind,
            id: self.record.id().cloned(),
            field,
            violation,
        }
    }

    fn present(&self, field: &'static str) -> Result<&'a FieldValue, ValidationError> {
        match self.record.get_field(field) {
            None => Err(self.reject(field, Violation::Missing)),
            Some(FieldValue::Null) => Err(self.reject(field, Violation::Null)),
            Some(value) => Ok(value),
        }
    }

    fn wrong_type(
        &self,
        field: &'static str,
        expected: &'static str,
        found: &FieldValue,
    ) -> ValidationError {
        self.reject(
            field,
            Violation::WrongType {
                expected,
                found: found.type_name(),
            },
        )
    }

    /// A non-empty string.
    fn text(&self, field: &'static str) -> Result<String, ValidationError> {
        match self.present(field)? {
            FieldValue::String(s) if s.is_empty() => Err(self.reject(field, Violation::Empty)),
            FieldValue::String(s) => Ok(s.clone()),
            other => Err(self.wrong_type(field, "string", other)),
        }
    }

    /// An integer. Floats are rejected even when they have no fractional part.
    fn integer(&self, field: &'static str) -> Result<i64, ValidationError> {
        let value = self.present(field)?;
        value
            .as_i64()
            .ok_or_else(|| self.wrong_type(field, "integer", value))
    }

    /// An integer or a float.
    fn number(&self, field: &'static str) -> Result<f64, ValidationError> {
        let value = self.present(field)?;
        value
            .as_f64()
            .ok_or_else(|| self.wrong_type(field, "number", value))
    }
}

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_record(record: &Record) -> Result<Self, ValidationError> {
        let check = FieldCheck::new(Self::KIND, record);
        let name = check.text("name")?;
        let email = check.text("email")?;
        let id = check.integer(ID_FIELD)?;
        Ok(Self { id, name, email })
    }
}

/// A row of the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

impl Entity for Product {
    const KIND: EntityKind = EntityKind::Product;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_record(record: &Record) -> Result<Self, ValidationError> {
        let check = FieldCheck::new(Self::KIND, record);
        let name = check.text("name")?;
        let price = check.number("price")?;
        let id = check.integer(ID_FIELD)?;
        Ok(Self { id, name, price })
    }
}

/// A row of the `orders` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

impl Entity for Order {
    const KIND: EntityKind = EntityKind::Order;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_record(record: &Record) -> Result<Self, ValidationError> {
        let check = FieldCheck::new(Self::KIND, record);
        let user_id = check.integer("user_id")?;
        let product_id = check.integer("product_id")?;
        let quantity = check.integer("quantity")?;
        let id = check.integer(ID_FIELD)?;
        Ok(Self {
            id,
            user_id,
            product_id,
            quantity,
        })
    }
}
