//! Borrower fact model.
//!
//! Borrower records come from the application intake and carry whatever the
//! intake collected (name, employer, stated income, loan amount, loan type,
//! submission time). The evaluator never interprets them; they are handed to
//! the model as-is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{UnderwritingError, UnderwritingResult};

/// An open, caller-supplied borrower record.
///
/// Serializes transparently as the underlying JSON object.
///
/// # Example
///
/// ```
/// use paystub_underwriter::models::BorrowerFact;
///
/// let borrower = BorrowerFact::from_json_str(r#"{"name": "Jane Doe", "loan_type": "FHA"}"#).unwrap();
/// assert_eq!(borrower.get_str("name"), Some("Jane Doe"));
/// assert_eq!(borrower.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BorrowerFact(Map<String, Value>);

impl BorrowerFact {
    /// Creates an empty borrower record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a borrower record from JSON text.
    ///
    /// The text must hold a JSON object; any other JSON value is rejected with
    /// [`UnderwritingError::InvalidBorrower`].
    pub fn from_json_str(json: &str) -> UnderwritingResult<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| UnderwritingError::InvalidBorrower {
                message: e.to_string(),
            })?;
        Self::try_from(value)
    }

    /// Sets a field, returning the record for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value stored under `key` if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for BorrowerFact {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for BorrowerFact {
    type Error = UnderwritingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(UnderwritingError::InvalidBorrower {
                message: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
