//! Backend collaborator - customer and product records, order submission.
//!
//! The desk only depends on [`OrderBackend`]; [`ApiClient`] is the HTTP implementation
//! and tests substitute an in-memory one.

/// reqwest-based backend client
pub mod client;

pub use client::ApiClient;

use crate::{
    entities::{Customer, CustomerSummary, ProductOrder},
    errors::Result,
};
use async_trait::async_trait;

/// Operations the order desk needs from the backend.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Rows for the customer picker.
    async fn customer_names(&self) -> Result<Vec<CustomerSummary>>;

    /// Full record of one customer.
    async fn customer(&self, id: &str) -> Result<Customer>;

    /// Every order stored for a customer, in feed order.
    async fn products(&self, customer_id: &str) -> Result<Vec<ProductOrder>>;

    /// Hands a normalized order over for persistence.
    async fn submit_order(&self, order: &ProductOrder) -> Result<()>;
}
