//! Shared test utilities for the order desk.
//!
//! Fixtures with sensible defaults and an in-memory [`OrderBackend`].

use crate::{
    api::OrderBackend,
    config::{Credentials, YASH_HOME_DECORS},
    core::{InvoiceDocument, assemble, group},
    entities::{Customer, CustomerSummary, ProductImage, ProductOrder},
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::sync::Mutex;

/// Customer with only the identity fields set.
pub fn test_customer(cid: &str, name: &str) -> Customer {
    Customer {
        id: Some(format!("id-{cid}")),
        cid: Some(cid.to_string()),
        client_name: Some(name.to_string()),
        ..Default::default()
    }
}

/// Customer with every field filled.
pub fn full_test_customer() -> Customer {
    Customer {
        id: Some("1".to_string()),
        cid: Some("C1".to_string()),
        client_name: Some("Alice".to_string()),
        email_address: Some("alice@example.com".to_string()),
        address: Some("12 Beach Road, Chennai".to_string()),
        client_type: Some("Residential".to_string()),
        purpose: Some("New flat".to_string()),
        phone: Some("+91-90000-00001".to_string()),
    }
}

/// Stored order of customer C1 with `description` set.
///
/// # Defaults
/// * customer: Alice / C1
/// * no images
pub fn test_product(category: &str, description: &str) -> ProductOrder {
    let mut data = Map::new();
    data.insert(
        "description".to_string(),
        Value::String(description.to_string()),
    );
    ProductOrder {
        id: None,
        customer_name: "Alice".to_string(),
        customer_id: "C1".to_string(),
        category: category.to_string(),
        data,
        images: Vec::new(),
    }
}

/// Stored order carrying one base64 image.
pub fn test_product_with_image(category: &str, description: &str, image_data: &str) -> ProductOrder {
    let mut product = test_product(category, description);
    product.images.push(ProductImage {
        image_data: image_data.to_string(),
    });
    product
}

/// Fixed invoice date.
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 19).unwrap_or_default()
}

/// Small invoice with one blinds order.
pub fn test_invoice() -> InvoiceDocument {
    let groups = group(vec![test_product("Blinds", "b1")]).unwrap_or_default();
    let customer = test_customer("C1", "Alice");
    assemble(Some(&customer), &groups, &YASH_HOME_DECORS, test_date())
        .unwrap_or_else(|e| panic!("test invoice should assemble: {e}"))
}

/// Credentials for user `desk` with password `secret`.
pub fn test_credentials() -> Credentials {
    Credentials {
        username: "desk".to_string(),
        password: "secret".to_string(),
    }
}

/// In-memory backend.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    pub customers: Vec<Customer>,
    pub products: Vec<ProductOrder>,
    pub submitted: Mutex<Vec<ProductOrder>>,
    /// When set, every call fails with `NetworkFailure`
    pub offline: bool,
}

impl InMemoryBackend {
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self {
            customers,
            ..Default::default()
        }
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            return Err(Error::NetworkFailure {
                message: "backend offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl OrderBackend for InMemoryBackend {
    async fn customer_names(&self) -> Result<Vec<CustomerSummary>> {
        self.check_online()?;
        Ok(self
            .customers
            .iter()
            .map(|c| CustomerSummary {
                id: c.id.clone(),
                cid: c.cid.clone(),
                client_name: c.client_name.clone(),
                email_address: c.email_address.clone(),
            })
            .collect())
    }

    async fn customer(&self, id: &str) -> Result<Customer> {
        self.check_online()?;
        self.customers
            .iter()
            .find(|c| c.id.as_deref() == Some(id) || c.cid.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| Error::ServiceFailure {
                status: 404,
                message: format!("customer {id} not found"),
            })
    }

    async fn products(&self, customer_id: &str) -> Result<Vec<ProductOrder>> {
        self.check_online()?;
        Ok(self
            .products
            .iter()
            .filter(|p| p.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn submit_order(&self, order: &ProductOrder) -> Result<()> {
        self.check_online()?;
        self.submitted
            .lock()
            .map_err(|_| Error::NetworkFailure {
                message: "poisoned".to_string(),
            })?
            .push(order.clone());
        Ok(())
    }
}
