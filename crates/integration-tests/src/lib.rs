//! Integration tests for Cartwheel.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartwheel-integration-tests
//!
//! # More property-test cases
//! PROPTEST_CASES=10000 cargo test -p cartwheel-integration-tests --test properties
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Store, pricing, recommendation, and checkout together
//! - `properties` - Property tests over the cart store and pricing
//!
//! This library only holds fixtures shared by the test files.

#![cfg_attr(not(test), forbid(unsafe_code))]

use cartwheel_core::{CartStore, CatalogPage, InMemoryRepository, Product, ProductId};
use rust_decimal::Decimal;

/// Parse a product ID that is known to be valid.
///
/// # Panics
///
/// Panics if `id` is blank.
#[must_use]
pub fn id(id: &str) -> ProductId {
    ProductId::parse(id).expect("fixture product IDs are non-empty")
}

/// A product snapshot priced in whole currency units.
#[must_use]
pub fn product(product_id: &str, price: i64, stock: u32) -> Product {
    Product::new(
        id(product_id),
        format!("Product {product_id}"),
        Decimal::new(price, 0),
        stock,
    )
}

/// A single catalog page holding `products` in order.
#[must_use]
pub fn page(products: &[Product]) -> CatalogPage {
    CatalogPage::single(products.to_vec())
}

/// A store over a fresh in-memory repository.
#[must_use]
pub fn store() -> CartStore<InMemoryRepository> {
    CartStore::new(InMemoryRepository::default())
}
