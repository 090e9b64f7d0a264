/*!
 * Storage-ready record types
 *
 * A prepared record is a flat mapping of column names to scalar values,
 * ready for insertion into a relational schema. Serialization with
 * serde_json yields one flat JSON object per record.
 */

use std::collections::BTreeMap;

use serde::Serialize;

/// A scalar column value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Text(String),
    Integer(i64),
    Null,
}

impl ScalarValue {
    /// Check whether the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// The text content, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// The integer content, if any
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ScalarValue::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Text(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Integer(value)
    }
}

impl From<Option<String>> for ScalarValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(text) => ScalarValue::Text(text),
            None => ScalarValue::Null,
        }
    }
}

impl std::fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarValue::Text(value) => write!(f, "{}", value),
            ScalarValue::Integer(value) => write!(f, "{}", value),
            ScalarValue::Null => write!(f, "NULL"),
        }
    }
}

/// One flat record produced by a field preparer
///
/// Holds the positional metadata columns merged with the datatype
/// payload columns. Column order is deterministic (sorted by name).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PreparedRecord {
    columns: BTreeMap<String, ScalarValue>,
}

impl PreparedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value, replacing any previous value for that name
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<ScalarValue>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Get a column value by name
    pub fn get(&self, column: &str) -> Option<&ScalarValue> {
        self.columns.get(column)
    }

    /// Whether the record contains a column
    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Number of columns in the record
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over columns in name order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_value_conversions() {
        assert_eq!(ScalarValue::from("A01"), ScalarValue::Text("A01".to_string()));
        assert_eq!(ScalarValue::from(7), ScalarValue::Integer(7));
        assert_eq!(ScalarValue::from(None::<String>), ScalarValue::Null);
        assert!(ScalarValue::Null.is_null());
    }

    #[test]
    fn test_record_set_and_get() {
        let mut record = PreparedRecord::new();
        record.set("code", "123");
        record.set("display", ScalarValue::Null);
        assert_eq!(record.get("code").and_then(ScalarValue::as_text), Some("123"));
        assert!(record.get("display").unwrap().is_null());
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_record_serializes_flat() {
        let mut record = PreparedRecord::new();
        record.set("code", "123");
        record.set("count", 2);
        record.set("system", ScalarValue::Null);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "123", "count": 2, "system": null})
        );
    }
}
