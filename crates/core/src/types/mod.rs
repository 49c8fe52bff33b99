//! Core types for Cartwheel.
//!
//! This module provides type-safe wrappers for identifiers, money, and the
//! catalog records the cart is built from.

pub mod id;
pub mod money;
pub mod product;
pub mod status;

pub use id::{ProductId, ProductIdError};
pub use money::{CurrencyCode, Money, MoneyError};
pub use product::{CatalogPage, Product};
pub use status::SaveStatus;
