//! Order form state - The key/value payload collected while a capture form is open.

use serde_json::Number;
use std::collections::BTreeMap;

/// Value of one form input.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Free text input
    Text(String),
    /// Numeric input (quantities, areas)
    Number(Number),
    /// Raw bytes of an uploaded image
    Image(Vec<u8>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Image(value)
    }
}

/// Form payload keyed by field name. Sorted keys keep normalization deterministic.
pub type OrderFormState = BTreeMap<String, FieldValue>;
