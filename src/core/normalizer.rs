//! Order submission normalizer - Turns a filled form into a [`ProductOrder`].
//!
//! The normalizer never looks inside category fields: text and numbers are copied into
//! `data` as entered and image uploads are base64 encoded into `images`. Adding a
//! category therefore only touches the registry.

use crate::{
    entities::{Category, Customer, FieldValue, OrderFormState, ProductImage, ProductOrder},
    errors::{Error, Result},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Map, Value};

/// Builds the normalized order for `customer` from a form payload.
///
/// # Errors
/// Returns `IncompleteCustomer` when the customer has no name or no id. No order is
/// produced in that case.
pub fn normalize(
    customer: &Customer,
    category: Category,
    form_state: &OrderFormState,
) -> Result<ProductOrder> {
    let customer_name = customer.name().ok_or(Error::IncompleteCustomer {
        missing: "clientName",
    })?;
    let customer_id = customer
        .order_id()
        .ok_or(Error::IncompleteCustomer { missing: "cid" })?;

    let mut data = Map::new();
    let mut images = Vec::new();

    for (key, value) in form_state {
        match value {
            FieldValue::Text(text) => {
                data.insert(key.clone(), Value::String(text.clone()));
            }
            FieldValue::Number(number) => {
                data.insert(key.clone(), Value::Number(number.clone()));
            }
            FieldValue::Image(bytes) => images.push(ProductImage {
                image_data: STANDARD.encode(bytes),
            }),
        }
    }

    tracing::debug!(
        "Normalized {} order for customer {} ({} fields, {} images)",
        category,
        customer_id,
        data.len(),
        images.len()
    );

    Ok(ProductOrder {
        id: None,
        customer_name: customer_name.to_string(),
        customer_id: customer_id.to_string(),
        category: category.as_str().to_string(),
        data,
        images,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use serde_json::json;

    #[test]
    fn test_normalize_copies_fields_verbatim() {
        let customer = test_customer("C1", "Alice");
        let mut form = OrderFormState::new();
        form.insert("description".to_string(), "d".into());
        form.insert("size".to_string(), "5x6".into());
        form.insert("quantity".to_string(), FieldValue::from(2_i64));

        let order = normalize(&customer, Category::Blinds, &form).unwrap();

        assert_eq!(order.customer_name, "Alice");
        assert_eq!(order.customer_id, "C1");
        assert_eq!(order.category, "Blinds");
        assert_eq!(
            Value::Object(order.data),
            json!({ "description": "d", "size": "5x6", "quantity": 2 })
        );
        assert!(order.images.is_empty());
    }

    #[test]
    fn test_normalize_encodes_images() {
        let customer = test_customer("C1", "Alice");
        let mut form = OrderFormState::new();
        form.insert("image".to_string(), b"hello".to_vec().into());
        form.insert("title".to_string(), "Corner sofa".into());

        let order = normalize(&customer, Category::Sofas, &form).unwrap();

        assert_eq!(order.images.len(), 1);
        assert_eq!(order.images[0].image_data, "aGVsbG8=");
        assert!(!order.data.contains_key("image"));
        assert_eq!(order.field_text("title"), "Corner sofa");
    }

    #[test]
    fn test_normalize_requires_customer_name() {
        let customer = Customer {
            cid: Some("C1".to_string()),
            ..Default::default()
        };
        let err = normalize(&customer, Category::Blinds, &OrderFormState::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::IncompleteCustomer {
                missing: "clientName"
            }
        ));
    }

    #[test]
    fn test_normalize_requires_customer_id() {
        let customer = Customer {
            client_name: Some("Alice".to_string()),
            ..Default::default()
        };
        let err = normalize(&customer, Category::Blinds, &OrderFormState::new()).unwrap_err();
        assert!(matches!(err, Error::IncompleteCustomer { missing: "cid" }));
    }

    #[test]
    fn test_normalize_accepts_id_without_cid() {
        let customer = Customer {
            id: Some("17".to_string()),
            client_name: Some("Alice".to_string()),
            ..Default::default()
        };
        let order = normalize(&customer, Category::Carpets, &OrderFormState::new()).unwrap();
        assert_eq!(order.customer_id, "17");
        assert_eq!(order.category, "Carpets");
    }
}
