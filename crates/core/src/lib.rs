//! Cartwheel Core - Cart state and pricing engine.
//!
//! This crate holds everything a shopping client needs to keep a local cart:
//! - [`cart`] - The owned cart store with stock-bound quantity edits
//! - [`pricing`] - Subtotal, shipping, tax, and total derivation
//! - [`recommend`] - "You may also like" selection over a catalog page
//! - [`checkout`] - Session-gated checkout handoff
//! - [`persistence`] - The storage seam the cart store saves through
//!
//! # Architecture
//!
//! The core crate does no I/O of its own. Catalog pages and persisted carts are
//! handed in as plain values; saving goes through the [`CartRepository`] trait
//! supplied by the caller. Every operation returns immediately.
//!
//! # Example
//!
//! ```rust
//! use cartwheel_core::{CartStore, InMemoryRepository, PricingPolicy, Product, ProductId};
//! use rust_decimal::Decimal;
//!
//! let mut store = CartStore::new(InMemoryRepository::default());
//! let tee = Product::new(ProductId::parse("tee").unwrap(), "Tee", Decimal::new(500, 0), 10);
//! store.add_or_update(&tee, 1);
//!
//! let summary = PricingPolicy::default().compute_summary(store.snapshot());
//! assert_eq!(summary.total.to_string(), "690.00");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod persistence;
pub mod pricing;
pub mod recommend;
pub mod types;

pub use cart::{CartEvent, CartState, CartStore, LineItem};
pub use checkout::{CheckoutError, CheckoutStep, LOGIN_PATH, begin_checkout, complete_handoff};
pub use persistence::{CartRepository, InMemoryRepository, PersistenceError};
pub use pricing::{PricingPolicy, PricingSummary};
pub use recommend::{DEFAULT_RECOMMENDATION_LIMIT, recommend};
pub use types::*;
