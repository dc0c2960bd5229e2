//! Raw exam record model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of a department dataset.
///
/// Keys are department specific (e.g. `"ID"` for CSE, `"Course ID"` for SWE),
/// so the record keeps the raw JSON object and leaves interpretation to the
/// department's field mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExamRecord {
    fields: Map<String, Value>,
}

impl ExamRecord {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing JSON object
    #[must_use]
    pub const fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Builder-style insert of a string value
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a string value
    pub fn insert(&mut self, key: &str, value: &str) {
        self.fields
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    /// Raw value under `key` rendered as text.
    ///
    /// Strings are returned as-is, numbers and booleans in their JSON form.
    /// `null`, arrays, objects and missing keys yield `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Like [`get`](Self::get) but `None` for values that count as absent:
    /// empty strings, numeric zero and `false`.
    #[must_use]
    pub fn present(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::Number(n) if n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON) => None,
            Value::Bool(false) => None,
            _ => self.get(key).filter(|v| !v.is_empty()),
        }
    }

    /// Like [`get`](Self::get) but substitutes the empty string
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default()
    }

    /// Whether the key is present at all (even when `null`)
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Underlying JSON object
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume the record, returning the JSON object
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for ExamRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_map(fields)
    }
}
