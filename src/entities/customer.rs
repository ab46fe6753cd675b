//! Customer entity - Customer records as served by the backend.
//!
//! Customers are created elsewhere and are read-only here. Every field is optional
//! on the wire; the normalizer decides which ones an order actually needs.

use crate::entities::wire::string_or_number;
use serde::{Deserialize, Serialize};

/// Full customer record (`GET /customer/{id}`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Backend row identifier
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    /// Shop-facing customer code (e.g., "C1")
    #[serde(default, deserialize_with = "string_or_number")]
    pub cid: Option<String>,
    /// Display name
    #[serde(default)]
    pub client_name: Option<String>,
    /// Contact email
    #[serde(default)]
    pub email_address: Option<String>,
    /// Postal address
    #[serde(default)]
    pub address: Option<String>,
    /// Client type (e.g., "Residential", "Architect")
    #[serde(default)]
    pub client_type: Option<String>,
    /// Purpose of the purchase
    #[serde(default)]
    pub purpose: Option<String>,
    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
}

impl Customer {
    /// Identity written onto orders: `cid` when present, otherwise `id`.
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        non_blank(self.cid.as_deref()).or_else(|| non_blank(self.id.as_deref()))
    }

    /// Customer name, ignoring blank values.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_blank(self.client_name.as_deref())
    }
}

/// Row of the customer picker (`GET /customer/names`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    /// Backend row identifier
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    /// Shop-facing customer code
    #[serde(default, deserialize_with = "string_or_number")]
    pub cid: Option<String>,
    /// Display name
    #[serde(default)]
    pub client_name: Option<String>,
    /// Contact email
    #[serde(default)]
    pub email_address: Option<String>,
}

impl CustomerSummary {
    /// Key used to fetch the full record.
    #[must_use]
    pub fn lookup_key(&self) -> Option<&str> {
        non_blank(self.id.as_deref()).or_else(|| non_blank(self.cid.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
