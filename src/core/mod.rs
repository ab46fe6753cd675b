//! Core business logic - framework-agnostic order capture, grouping and invoice assembly.

/// Customer picker search
pub mod customers;
/// Single-form capture session
pub mod dispatcher;
/// Category partitioning of product lists
pub mod grouping;
/// Invoice document assembly and HTML serialization
pub mod invoice;
/// Form-to-order normalization
pub mod normalizer;
/// Static category schemas
pub mod registry;

pub use dispatcher::OrderFormDispatcher;
pub use grouping::{ProductGroups, group};
pub use invoice::{InvoiceDocument, assemble};
pub use normalizer::normalize;
pub use registry::{CategorySchema, schema_for};
