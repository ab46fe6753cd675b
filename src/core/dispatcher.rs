//! Order form dispatcher - Drives a single capture session from category pick to submit.
//!
//! Only one form can be open at a time. The dispatcher owns the open/closed flag, the
//! customer the form was opened for and the payload collected so far. A failed submit
//! keeps the form open so the user can fix it; cancel always closes it without
//! producing an order.

use crate::{
    core::{
        normalizer,
        registry::{self, CategorySchema},
    },
    entities::{Customer, FieldValue, OrderFormState, ProductOrder},
    errors::{Error, Result},
};

/// An open order form.
#[derive(Debug)]
struct CaptureSession {
    schema: &'static CategorySchema,
    customer: Customer,
    state: OrderFormState,
}

/// Order form state machine.
#[derive(Debug, Default)]
pub struct OrderFormDispatcher {
    session: Option<CaptureSession>,
}

impl OrderFormDispatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self { session: None }
    }

    /// Opens the form for `category` on behalf of `customer`.
    ///
    /// Schema defaults (e.g., the sofa shape) are pre-filled.
    ///
    /// # Errors
    /// - `NoCustomerSelected` if `customer` is `None`
    /// - `UnknownCategory` if the category name is not in the registry
    /// - `SessionAlreadyActive` if another form is still open
    pub fn open(
        &mut self,
        category: &str,
        customer: Option<&Customer>,
    ) -> Result<&'static CategorySchema> {
        let customer = customer.ok_or(Error::NoCustomerSelected)?;
        let schema = registry::schema_for(category)?;

        if let Some(active) = &self.session {
            return Err(Error::SessionAlreadyActive {
                category: active.schema.category.to_string(),
            });
        }

        let state = schema
            .input_fields()
            .into_iter()
            .filter_map(|field| {
                field
                    .default
                    .map(|value| (field.name.to_string(), FieldValue::from(value)))
            })
            .collect();

        tracing::info!(
            "Opened {} order form for customer {}",
            schema.category,
            customer.order_id().unwrap_or("<unknown>")
        );

        self.session = Some(CaptureSession {
            schema,
            customer: customer.clone(),
            state,
        });
        Ok(schema)
    }

    /// Merges one field into the open form, replacing any previous value.
    ///
    /// # Errors
    /// Returns `NoActiveSession` when no form is open.
    pub fn update_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        let session = self.session.as_mut().ok_or(Error::NoActiveSession)?;
        tracing::trace!("Form field '{}' updated", name);
        session.state.insert(name.to_string(), value);
        Ok(())
    }

    /// Normalizes the open form into an order.
    ///
    /// On success the session is closed and its state dropped. On failure the session
    /// stays open with its state intact.
    ///
    /// # Errors
    /// - `NoActiveSession` when no form is open
    /// - any error from [`normalizer::normalize`]
    pub fn submit(&mut self) -> Result<ProductOrder> {
        let session = self.session.as_ref().ok_or(Error::NoActiveSession)?;
        let order = normalizer::normalize(&session.customer, session.schema.category, &session.state)
            .inspect_err(|e| tracing::warn!("Order submission rejected: {}", e))?;

        self.session = None;
        tracing::info!(
            "Submitted {} order for customer {}",
            order.category,
            order.customer_id
        );
        Ok(order)
    }

    /// Closes the form and discards its state. Safe to call when nothing is open.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!("Cancelled {} order form", session.schema.category);
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Schema of the open form, if any.
    #[must_use]
    pub fn active_schema(&self) -> Option<&'static CategorySchema> {
        self.session.as_ref().map(|session| session.schema)
    }

    /// Payload collected so far, if a form is open.
    #[must_use]
    pub fn form_state(&self) -> Option<&OrderFormState> {
        self.session.as_ref().map(|session| &session.state)
    }
}
