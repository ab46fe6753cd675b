//! Customer directory helpers for the customer picker.

use crate::entities::CustomerSummary;

/// Filters the picker list by a search term.
///
/// A customer matches when its name or email starts with `query`, ignoring case.
/// A blank query keeps every customer.
#[must_use]
pub fn filter_customers<'a>(customers: &'a [CustomerSummary], query: &str) -> Vec<&'a CustomerSummary> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return customers.iter().collect();
    }

    let starts_with = |value: Option<&String>| {
        value.is_some_and(|v| v.to_lowercase().starts_with(&needle))
    };

    customers
        .iter()
        .filter(|c| starts_with(c.client_name.as_ref()) || starts_with(c.email_address.as_ref()))
        .collect()
}
