//! Field values carried by caller-supplied records.
//!
//! Records arrive as loosely typed field mappings, so a field may hold a value
//! of the wrong type (or nothing at all). `FieldValue` keeps whatever the
//! caller provided; the entity validators decide whether it is acceptable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single, dynamically typed field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// String value
    String(String),

    /// Null value
    Null,
}

impl FieldValue {
    /// Try to get this value as an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a number. Integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Name of the value's type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::Int(42).as_i64(), Some(42));
        assert_eq!(FieldValue::Float(3.5).as_f64(), Some(3.5));
        assert_eq!(FieldValue::from("test"), FieldValue::String("test".to_string()));

        // Integers widen to floats, never the other way around
        assert_eq!(FieldValue::Int(7).as_f64(), Some(7.0));
        assert_eq!(FieldValue::Float(7.0).as_i64(), None);
        assert_eq!(FieldValue::Bool(true).as_i64(), None);
        assert_eq!(FieldValue::Bool(true).as_f64(), None);
    }

    #[test]
    fn test_option_conversion() {
        let none: Option<&str> = None;
        assert_eq!(FieldValue::from(none), FieldValue::Null);
        assert_eq!(
            FieldValue::from(Some("Alice")),
            FieldValue::String("Alice".to_string())
        );
    }

    #[test]
    fn test_deserialize_from_json() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"[null, true, 3, -50.0, "x"]"#).unwrap();

        assert_eq!(
            values,
            vec![
                FieldValue::Null,
                FieldValue::Bool(true),
                FieldValue::Int(3),
                FieldValue::Float(-50.0),
                FieldValue::String("x".to_string()),
            ]
        );
    }
}
