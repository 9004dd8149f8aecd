//! Ingested records

use serde_json::{Map, Value};

/// An ingested record: an arbitrary field-keyed JSON object
///
/// Geography-scoped rows, news metadata items and plain data points are all
/// records; which fields matter depends on the source scope.
pub type Record = Map<String, Value>;

/// Whether `key` exists in `record` with a non-null value
pub fn has_field(record: &Record, key: &str) -> bool {
    matches!(record.get(key), Some(value) if !value.is_null())
}

/// Whether a value is empty-equivalent
///
/// Null, a blank string, an empty array and an empty object are empty.
/// Numbers and booleans are never empty.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// String value of `key`, if present and a string
pub fn str_field<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}
