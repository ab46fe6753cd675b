//! Invoice document assembler - Builds the printable invoice for one customer.
//!
//! Assembly is split from delivery: this module produces an immutable
//! [`InvoiceDocument`] and its HTML body, and the export sinks decide how that body
//! reaches paper or PDF. Rendering is deterministic; the same customer, groups,
//! profile and date always give byte-identical markup, so the print and PDF paths
//! agree.

use crate::{
    config::business::BusinessProfile,
    core::{
        grouping::ProductGroups,
        registry::{DataPath, Renderer},
    },
    entities::{Category, Customer, ProductOrder},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use serde::Serialize;
use tera::{Context, Tera};

const INVOICE_TEMPLATE: &str = include_str!("templates/invoice.html.tera");
// The `.html` suffix turns on autoescaping
const INVOICE_TEMPLATE_NAME: &str = "invoice.html";

/// Notice shown when a customer has no orders at all.
pub const NO_PRODUCTS_NOTICE: &str = "Oops! No product data available";

const NO_IMAGE_TEXT: &str = "No Image Available";

/// Header block: seller identity and issue date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderBlock {
    /// Seller identity
    pub profile: BusinessProfile,
    /// Date printed on the invoice
    pub issued_on: NaiveDate,
}

/// One `Label: value` line of the customer block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerLine {
    /// Field label, e.g. "Customer Name"
    pub label: &'static str,
    /// Empty when the customer record lacks the field
    pub value: String,
}

/// Customer block, one labelled line per customer field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerBlock {
    /// Lines in print order
    pub lines: Vec<CustomerLine>,
}

impl CustomerBlock {
    /// Builds the block from a full customer record.
    #[must_use]
    pub fn from_customer(customer: &Customer) -> Self {
        let field = |label: &'static str, value: &Option<String>| CustomerLine {
            label,
            value: value.clone().unwrap_or_default(),
        };
        Self {
            lines: vec![
                field("Customer Name", &customer.client_name),
                field("Customer ID", &customer.cid),
                field("Address", &customer.address),
                field("Client Type", &customer.client_type),
                field("Purpose", &customer.purpose),
                field("Phone", &customer.phone),
                field("Email", &customer.email_address),
            ],
        }
    }
}

/// One rendered table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Cell {
    /// Escaped on render
    Text(String),
    /// Base64 image payload, `None` when the order has no image
    Image(Option<String>),
}

/// Table of one category's orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTable {
    /// Category of every row
    pub category: Category,
    /// Table heading
    pub title: &'static str,
    /// Column labels after the serial column
    pub headers: Vec<&'static str>,
    /// One row per order, in feed order
    pub rows: Vec<Vec<Cell>>,
}

impl CategoryTable {
    fn build(category: Category, orders: &[ProductOrder]) -> Self {
        let schema = category.schema();
        let rows = orders
            .iter()
            .map(|order| {
                schema
                    .columns
                    .iter()
                    .map(|column| match (column.renderer, column.path) {
                        (Renderer::Image, _) | (Renderer::Text, DataPath::FirstImage) => {
                            Cell::Image(order.first_image().map(str::to_string))
                        }
                        (Renderer::Text, DataPath::Data(key)) => Cell::Text(order.field_text(key)),
                    })
                    .collect()
            })
            .collect();

        Self {
            category,
            title: schema.title,
            headers: schema.columns.iter().map(|column| column.label).collect(),
            rows,
        }
    }
}

/// Assembled invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceDocument {
    /// Seller and date
    pub header: HeaderBlock,
    /// Buyer details
    pub customer: CustomerBlock,
    /// Non-empty category tables in display order
    pub tables: Vec<CategoryTable>,
}

/// Assembles the invoice for `customer`.
///
/// Categories without orders produce no table. The customer guard mirrors the UI,
/// which should never reach this point without a customer.
///
/// # Errors
/// Returns `NoCustomerSelected` when `customer` is `None`.
pub fn assemble(
    customer: Option<&Customer>,
    groups: &ProductGroups,
    profile: &BusinessProfile,
    issued_on: NaiveDate,
) -> Result<InvoiceDocument> {
    let customer = customer.ok_or(Error::NoCustomerSelected)?;

    let tables: Vec<CategoryTable> = groups
        .in_display_order()
        .map(|(category, orders)| CategoryTable::build(category, orders))
        .collect();

    tracing::debug!(
        "Assembled invoice with {} tables ({} orders)",
        tables.len(),
        groups.total()
    );

    Ok(InvoiceDocument {
        header: HeaderBlock {
            profile: *profile,
            issued_on,
        },
        customer: CustomerBlock::from_customer(customer),
        tables,
    })
}

impl InvoiceDocument {
    /// Renders the document body to HTML through the embedded invoice template.
    ///
    /// The markup carries no styling; export sinks wrap it with their own stylesheet.
    /// All record text is HTML-escaped.
    ///
    /// # Errors
    /// Returns `Template` if the document cannot be rendered.
    pub fn to_html(&self) -> Result<String> {
        let mut tera = Tera::default();
        tera.add_raw_template(INVOICE_TEMPLATE_NAME, INVOICE_TEMPLATE)?;

        let mut context = Context::from_serialize(self)?;
        context.insert("issued_on", &self.header.issued_on.format("%d/%m/%Y").to_string());
        context.insert("no_products_notice", NO_PRODUCTS_NOTICE);
        context.insert("no_image_text", NO_IMAGE_TEXT);

        Ok(tera.render(INVOICE_TEMPLATE_NAME, &context)?)
    }
}
