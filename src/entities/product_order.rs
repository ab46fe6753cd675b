//! Product order entity - One customer's order for one category.
//!
//! Orders are produced once by the normalizer and are immutable afterwards; the backend
//! owns them once submitted. The same shape comes back from `GET /products/{id}`, so the
//! category is kept as the wire string and validated when the list is grouped.

use crate::{
    entities::{
        Category,
        wire::{null_as_default, required_string_or_number},
    },
    errors::Result,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Image attached to an order, base64 encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    /// Base64 payload without a data-URL prefix
    pub image_data: String,
}

/// Normalized order record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOrder {
    /// Backend identifier, absent until persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Customer name at the time of ordering
    pub customer_name: String,
    /// Customer code; numeric codes are stored as text
    #[serde(deserialize_with = "required_string_or_number")]
    pub customer_id: String,
    /// Category name as stored
    pub category: String,
    /// Category-specific fields, opaque outside the registry
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ProductImage>,
}

impl ProductOrder {
    /// Resolves the stored category name against the closed category set.
    pub fn category(&self) -> Result<Category> {
        Category::parse(&self.category)
    }

    /// Base64 payload of the first attached image, if any.
    #[must_use]
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(|image| image.image_data.as_str())
    }

    /// Renders a data field for display. Strings are shown as-is, `null` and missing
    /// fields as empty text, anything else in its JSON form.
    #[must_use]
    pub fn field_text(&self, key: &str) -> String {
        match self.data.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}
