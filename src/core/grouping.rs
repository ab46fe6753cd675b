//! Product grouping engine - Partitions a customer's orders by category.
//!
//! Grouping is a single stable pass: every order lands in exactly one group and keeps
//! its position relative to the other orders of that category. An order with a
//! category outside the registry fails the whole call instead of being dropped.

use crate::{
    entities::{Category, ProductOrder},
    errors::Result,
};
use std::collections::BTreeMap;

/// Orders of one customer keyed by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductGroups {
    groups: BTreeMap<Category, Vec<ProductOrder>>,
}

impl ProductGroups {
    /// Orders of `category` in feed order; empty when there are none.
    #[must_use]
    pub fn get(&self, category: Category) -> &[ProductOrder] {
        self.groups
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of orders across all groups.
    #[must_use]
    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Non-empty groups in invoice display order.
    pub fn in_display_order(&self) -> impl Iterator<Item = (Category, &[ProductOrder])> {
        Category::DISPLAY_ORDER
            .into_iter()
            .map(|category| (category, self.get(category)))
            .filter(|(_, orders)| !orders.is_empty())
    }
}

/// Groups `products` by category.
///
/// # Errors
/// Returns `UnknownCategory` for the first order whose category is not registered.
pub fn group<I>(products: I) -> Result<ProductGroups>
where
    I: IntoIterator<Item = ProductOrder>,
{
    let mut groups: BTreeMap<Category, Vec<ProductOrder>> = BTreeMap::new();

    for product in products {
        let category = product
            .category()
            .inspect_err(|e| tracing::error!("Refusing to group product list: {}", e))?;
        groups.entry(category).or_default().push(product);
    }

    tracing::debug!("Grouped products into {} categories", groups.len());
    Ok(ProductGroups { groups })
}
