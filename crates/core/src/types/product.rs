//! Catalog product snapshots.
//!
//! These mirror the records the catalog service returns. Field names follow the
//! service's JSON (`_id`, `image`, `price`, `countInStock`).

use serde::{Deserialize, Serialize};

use super::{Money, ProductId};

/// A point-in-time copy of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Image URL or path, passed through to the display layer.
    #[serde(rename = "image", default)]
    pub image_ref: String,
    /// Price per unit in major units on the wire.
    #[serde(rename = "price")]
    pub unit_price: Money,
    /// Units in stock when the snapshot was taken.
    #[serde(rename = "countInStock", default)]
    pub stock_available: u32,
}

impl Product {
    /// Create a snapshot from a decimal unit price.
    ///
    /// Negative prices are clamped to zero; use [`Money::from_decimal`]
    /// directly to reject them instead.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: rust_decimal::Decimal,
        stock_available: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            image_ref: String::new(),
            unit_price: Money::from_decimal(unit_price).unwrap_or_default(),
            stock_available,
        }
    }

    /// Attach an image reference.
    #[must_use]
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    /// Returns `true` if at least one unit can be added to a cart.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock_available > 0
    }
}

/// One page of catalog results, in the service's relevance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Products on this page.
    pub products: Vec<Product>,
    /// 1-based page number.
    #[serde(default = "first_page")]
    pub page: u32,
    /// Total number of pages.
    #[serde(default = "first_page")]
    pub pages: u32,
}

const fn first_page() -> u32 {
    1
}

impl CatalogPage {
    /// Wrap a list of products as a single page.
    #[must_use]
    pub const fn single(products: Vec<Product>) -> Self {
        Self {
            products,
            page: 1,
            pages: 1,
        }
    }
}
