//! Command handlers behind the `decor-orders` CLI.
//!
//! Handlers talk to the backend only through [`OrderBackend`] and return the text to
//! show the user, so they run unchanged against the in-memory backend in tests.

use crate::{
    api::OrderBackend,
    config::BusinessProfile,
    core::{
        InvoiceDocument, OrderFormDispatcher, assemble,
        customers::filter_customers,
        group,
        invoice::{CustomerBlock, NO_PRODUCTS_NOTICE},
        registry::{IMAGE_FIELD, InputKind},
    },
    entities::{Category, FieldValue, ProductOrder},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::instrument;

/// Raw values collected for one order form.
#[derive(Debug, Clone, Default)]
pub struct OrderInput {
    /// `(field, value)` pairs as typed on the command line
    pub fields: Vec<(String, String)>,
    /// Image file uploaded for the category's image column
    pub image: Option<PathBuf>,
}

/// Lists picker rows, optionally filtered by a name or email prefix.
#[instrument(skip(backend))]
pub async fn list_customers<B: OrderBackend + ?Sized>(
    backend: &B,
    search: Option<&str>,
) -> Result<String> {
    let customers = backend.customer_names().await?;
    let matches = filter_customers(&customers, search.unwrap_or_default());

    if matches.is_empty() {
        return Ok(search.map_or_else(
            || "No customers found.".to_string(),
            |query| format!("No customers match '{query}'."),
        ));
    }

    let mut out = String::new();
    for customer in matches {
        let _ = writeln!(
            out,
            "{:<10} {:<24} {}",
            customer.lookup_key().unwrap_or("-"),
            customer.client_name.as_deref().unwrap_or("<unnamed>"),
            customer.email_address.as_deref().unwrap_or_default()
        );
    }
    Ok(out)
}

/// Shows the full record of one customer.
#[instrument(skip(backend))]
pub async fn show_customer<B: OrderBackend + ?Sized>(backend: &B, id: &str) -> Result<String> {
    let customer = backend.customer(id).await?;
    let mut out = String::new();
    for line in CustomerBlock::from_customer(&customer).lines {
        let _ = writeln!(out, "{}: {}", line.label, line.value);
    }
    Ok(out)
}

/// Describes every category's capture form, in display order.
#[must_use]
pub fn list_categories() -> String {
    let mut out = String::new();
    for category in Category::DISPLAY_ORDER {
        let schema = category.schema();
        let _ = writeln!(out, "{} ({})", category, schema.title);
        for field in schema.input_fields() {
            let kind = match field.kind {
                InputKind::Text => "text",
                InputKind::Number => "number",
                InputKind::Image => "image",
            };
            let default = field
                .default
                .map(|value| format!(" [default: {value}]"))
                .unwrap_or_default();
            let _ = writeln!(out, "  {:<16} {:<20} {kind}{default}", field.name, field.label);
        }
    }
    out
}

/// Captures one order for `customer_id` and submits it to the backend.
///
/// The form is opened through the dispatcher, so schema defaults apply and the same
/// customer checks as the interactive desk are enforced.
///
/// # Errors
/// - backend errors while loading the customer or submitting the order
/// - `UnknownCategory` for a category outside the registry
/// - `InvalidField` for a non-numeric value in a number field
/// - `IncompleteCustomer` when the customer lacks a name or code
#[instrument(skip(backend, input))]
pub async fn place_order<B: OrderBackend + ?Sized>(
    backend: &B,
    customer_id: &str,
    category: &str,
    input: OrderInput,
) -> Result<ProductOrder> {
    let customer = backend.customer(customer_id).await?;

    let mut dispatcher = OrderFormDispatcher::new();
    let schema = dispatcher.open(category, Some(&customer))?;

    let captured = fill_form(&mut dispatcher, schema.category, input).await;
    let order = match captured.and_then(|()| dispatcher.submit()) {
        Ok(order) => order,
        Err(e) => {
            dispatcher.cancel();
            return Err(e);
        }
    };

    backend
        .submit_order(&order)
        .await
        .inspect_err(|e| tracing::error!("Failed to save {} order: {}", order.category, e))?;
    Ok(order)
}

async fn fill_form(
    dispatcher: &mut OrderFormDispatcher,
    category: Category,
    input: OrderInput,
) -> Result<()> {
    let schema = category.schema();

    for (name, raw) in input.fields {
        let value = match schema.input_field(&name).map(|field| field.kind) {
            Some(InputKind::Number) => {
                let number = raw.trim().parse::<serde_json::Number>().map_err(|_| {
                    Error::InvalidField {
                        field: name.clone(),
                        reason: format!("'{raw}' is not a number"),
                    }
                })?;
                FieldValue::Number(number)
            }
            Some(InputKind::Image) => {
                return Err(Error::InvalidField {
                    field: name,
                    reason: "images are uploaded with --image".to_string(),
                });
            }
            Some(InputKind::Text) => FieldValue::Text(raw),
            None => {
                tracing::warn!("'{}' is not a {} form field; storing it anyway", name, category);
                FieldValue::Text(raw)
            }
        };
        dispatcher.update_field(&name, value)?;
    }

    if let Some(path) = input.image {
        let bytes = tokio::fs::read(&path).await?;
        tracing::debug!("Read {} byte image from {}", bytes.len(), path.display());
        dispatcher.update_field(IMAGE_FIELD, FieldValue::Image(bytes))?;
    }

    Ok(())
}

/// Loads a customer's orders and assembles their invoice.
#[instrument(skip(backend, profile))]
pub async fn build_invoice<B: OrderBackend + ?Sized>(
    backend: &B,
    customer_id: &str,
    profile: &BusinessProfile,
    issued_on: NaiveDate,
) -> Result<InvoiceDocument> {
    let customer = backend.customer(customer_id).await?;
    let products = backend.products(customer_id).await?;
    let groups = group(products)?;

    if groups.is_empty() {
        tracing::info!("{}", NO_PRODUCTS_NOTICE);
    }

    assemble(Some(&customer), &groups, profile, issued_on)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{config::YASH_HOME_DECORS, test_utils::*};
    use serde_json::json;

    fn backend() -> InMemoryBackend {
        let mut backend = InMemoryBackend::with_customers(vec![
            full_test_customer(),
            test_customer("C2", "Bala"),
        ]);
        backend.products = vec![
            test_product("Blinds", "b1"),
            test_product("Sofas", "s1"),
        ];
        backend
    }

    fn input(fields: &[(&str, &str)]) -> OrderInput {
        OrderInput {
            fields: fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_list_customers_filters_by_prefix() {
        let backend = backend();

        let all = list_customers(&backend, None).await.unwrap();
        assert!(all.contains("Alice"));
        assert!(all.contains("Bala"));

        let some = list_customers(&backend, Some("ba")).await.unwrap();
        assert!(!some.contains("Alice"));
        assert!(some.contains("Bala"));

        let none = list_customers(&backend, Some("zed")).await.unwrap();
        assert_eq!(none, "No customers match 'zed'.");
    }

    #[tokio::test]
    async fn test_show_customer_prints_labelled_lines() {
        let out = show_customer(&backend(), "1").await.unwrap();
        assert!(out.contains("Customer Name: Alice"));
        assert!(out.contains("Customer ID: C1"));
        assert!(out.contains("Phone: +91-90000-00001"));
    }

    #[test]
    fn test_list_categories_follows_display_order() {
        let out = list_categories();
        let curtains = out.find("Curtains (Curtain Orders)").unwrap();
        let carpets = out.find("Carpets").unwrap();
        assert!(curtains < carpets);
        assert!(out.contains("[default: L-Shaped]"));
    }

    #[tokio::test]
    async fn test_place_order_submits_normalized_order() {
        let backend = backend();

        let order = place_order(
            &backend,
            "C1",
            "Blinds",
            input(&[("size", "5x6"), ("quantity", "2")]),
        )
        .await
        .unwrap();

        assert_eq!(order.customer_id, "C1");
        assert_eq!(order.customer_name, "Alice");
        assert_eq!(order.data["size"], json!("5x6"));
        assert_eq!(order.data["quantity"], json!(2));

        let submitted = backend.submitted.lock().unwrap();
        assert_eq!(submitted.as_slice(), &[order]);
    }

    #[tokio::test]
    async fn test_place_order_attaches_image_as_base64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fabric.jpg");
        std::fs::write(&path, b"hello").unwrap();
        let backend = backend();

        let order = place_order(
            &backend,
            "C1",
            "Curtains",
            OrderInput {
                fields: vec![("description".to_string(), "Linen".to_string())],
                image: Some(path),
            },
        )
        .await
        .unwrap();

        assert_eq!(order.first_image(), Some("aGVsbG8="));
    }

    #[tokio::test]
    async fn test_place_order_rejects_non_numeric_quantity() {
        let backend = backend();

        let err = place_order(&backend, "C1", "Blinds", input(&[("quantity", "two")]))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidField { ref field, .. } if field == "quantity"));
        assert!(backend.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_place_order_unknown_category() {
        let err = place_order(&backend(), "C1", "Lamps", OrderInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownCategory { .. }));
    }

    #[tokio::test]
    async fn test_place_order_backend_failure_is_reported() {
        let mut backend = backend();
        backend.offline = true;

        let err = place_order(&backend, "C1", "Blinds", OrderInput::default())
            .await
            .unwrap_err();
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_build_invoice_groups_orders() {
        let invoice = build_invoice(&backend(), "C1", &YASH_HOME_DECORS, test_date())
            .await
            .unwrap();

        let titles: Vec<&str> = invoice.tables.iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Sofa Orders", "Blind Orders"]);
    }

    #[tokio::test]
    async fn test_build_invoice_without_orders_shows_notice() {
        let invoice = build_invoice(&backend(), "C2", &YASH_HOME_DECORS, test_date())
            .await
            .unwrap();

        assert!(invoice.tables.is_empty());
        assert!(invoice.to_html().unwrap().contains(NO_PRODUCTS_NOTICE));
    }
}
