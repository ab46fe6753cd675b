//! Entity module - Plain data types shared by the order pipeline.
//! These mirror the records exchanged with the backend plus the in-memory
//! form state of an open order form.

/// Closed product category set
pub mod category;
/// Customer records
pub mod customer;
/// Capture form payload
pub mod order_form;
/// Normalized orders
pub mod product_order;
mod wire;

pub use category::Category;
pub use customer::{Customer, CustomerSummary};
pub use order_form::{FieldValue, OrderFormState};
pub use product_order::{ProductImage, ProductOrder};
