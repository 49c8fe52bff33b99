//! "You may also like" selection.

use std::collections::HashSet;

use crate::cart::CartState;
use crate::types::{CatalogPage, Product};

/// Default number of products requested for the recommendation strip.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 4;

/// Pick up to `limit` catalog products the cart does not already hold.
///
/// The catalog's order is kept: it reflects the catalog service's ranking. A
/// product listed twice on the page is offered once. A `limit` of zero yields
/// nothing.
#[must_use]
pub fn recommend<'a>(page: &'a CatalogPage, cart: &CartState, limit: usize) -> Vec<&'a Product> {
    let mut seen = HashSet::new();
    page.products
        .iter()
        .filter(|product| !cart.contains(&product.id))
        .filter(|product| seen.insert(product.id.clone()))
        .take(limit)
        .collect()
}
