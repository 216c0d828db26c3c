//! Caller-supplied records.

use crate::values::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the key field shared by every entity kind.
pub const ID_FIELD: &str = "id";

/// One candidate row, as a mapping of field name to value.
///
/// A record carries no schema of its own. The same record may be valid for
/// one entity kind and rejected by another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Create a record from an existing field mapping.
    pub fn new(fields: BTreeMap<String, FieldValue>) -> Self {
        Self { fields }
    }

    /// Start building a record field by field.
    pub fn builder() -> RecordBuilder {
        RecordBuilder {
            fields: BTreeMap::new(),
        }
    }

    /// Get a field value by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// The raw `id` field, whatever its type.
    pub fn id(&self) -> Option<&FieldValue> {
        self.get_field(ID_FIELD)
    }

    /// Get the number of fields (including the id).
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Iterate over fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl TryFrom<serde_json::Value> for Record {
    type Error = serde_json::Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

/// Builder for `Record`.
pub struct RecordBuilder {
    fields: BTreeMap<String, FieldValue>,
}

impl RecordBuilder {
    /// Add a field to the record.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Build the record.
    pub fn build(self) -> Record {
        Record {
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_builder() {
        let record = Record::builder()
            .field("id", 1)
            .field("name", "Alice")
            .field("email", None::<&str>)
            .build();

        assert_eq!(record.field_count(), 3);
        assert_eq!(record.id(), Some(&FieldValue::Int(1)));
        assert_eq!(
            record.get_field("name"),
            Some(&FieldValue::String("Alice".to_string()))
        );
        assert_eq!(record.get_field("email"), Some(&FieldValue::Null));
        assert_eq!(record.get_field("missing"), None);
    }

    #[test]
    fn test_record_from_json_object() {
        let record =
            Record::try_from(json!({"id": 7, "name": "Laptop", "price": 1000.0})).unwrap();

        let names: Vec<&str> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["id", "name", "price"]);
        assert_eq!(record.get_field("price"), Some(&FieldValue::Float(1000.0)));
    }

    #[test]
    fn test_record_from_json_rejects_non_object() {
        assert!(Record::try_from(json!([1, 2, 3])).is_err());
    }
}
