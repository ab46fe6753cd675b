//! Unified error type for the order desk.
//!
//! Variants fall into three families: data-integrity failures (`UnknownCategory`),
//! precondition failures surfaced to the user (`NoCustomerSelected`,
//! `IncompleteCustomer`, `SessionAlreadyActive`, `ExportInProgress`) and failures of
//! the backend collaborator (`Unauthorized`, `NetworkFailure`, `ServiceFailure`).
//! `NoActiveSession` signals a wiring defect rather than a user mistake.

use thiserror::Error;

/// Every failure the order desk can report.
#[derive(Debug, Error)]
pub enum Error {
    /// A category name outside the closed set
    #[error("Unknown product category: '{name}'")]
    UnknownCategory { name: String },

    /// An operation needs a customer and none was chosen
    #[error("No customer selected")]
    NoCustomerSelected,

    /// The customer lacks a field an order needs
    #[error("Customer record is incomplete: missing {missing}")]
    IncompleteCustomer { missing: &'static str },

    /// A form operation ran with no form open
    #[error("No order form is open")]
    NoActiveSession,

    /// A second form was opened while one is still open
    #[error("An order form for {category} is already open")]
    SessionAlreadyActive { category: String },

    /// A PDF export was requested while another is generating
    #[error("A PDF export is already being generated")]
    ExportInProgress,

    /// A form value has the wrong shape for its field
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// Credentials are missing or were rejected (401/403)
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The backend could not be reached or timed out
    #[error("Network failure: {message}")]
    NetworkFailure { message: String },

    /// The backend answered with a non-success status or a malformed body
    #[error("Service failure ({status}): {message}")]
    ServiceFailure { status: u16, message: String },

    /// Settings could not be loaded
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Local file or process failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The invoice template failed to render
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl Error {
    /// Collaborator failures that leave the desk usable and can simply be retried.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::NetworkFailure { .. }
                | Self::ServiceFailure { .. }
                | Self::ExportInProgress
                | Self::Io(_)
        )
    }

    /// True for errors that only a wiring bug can produce.
    #[must_use]
    pub const fn is_defect(&self) -> bool {
        matches!(self, Self::NoActiveSession)
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
