//! Line items and the ordered cart they live in.

use serde::{Deserialize, Serialize};

use crate::types::{Money, Product, ProductId};

/// A product placed in the cart with its chosen quantity.
///
/// `1 <= quantity <= stock_available` holds for every line a [`CartState`]
/// contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image_ref: String,
    /// Price at the time the line was last added or updated.
    pub unit_price: Money,
    pub quantity: u32,
    /// Catalog stock at the time the line was last added or updated.
    pub stock_available: u32,
}

impl LineItem {
    /// Build a line from a catalog snapshot. Returns `None` when the product has
    /// no stock, since no quantity could satisfy the bound.
    pub(crate) fn from_product(product: &Product, requested: u32) -> Option<Self> {
        Some(Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            image_ref: product.image_ref.clone(),
            unit_price: product.unit_price,
            quantity: clamp_quantity(requested, product.stock_available)?,
            stock_available: product.stock_available,
        })
    }

    /// `quantity * unit_price`.
    #[must_use]
    pub const fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock_available > 0
    }

    /// Whether a `+1` adjustment would be accepted.
    #[must_use]
    pub const fn can_increment(&self) -> bool {
        self.quantity < self.stock_available
    }

    /// Whether a `-1` adjustment would be accepted.
    #[must_use]
    pub const fn can_decrement(&self) -> bool {
        self.quantity > 1
    }
}

/// Restrict a requested quantity to `1..=stock`. `None` when `stock` is zero.
#[must_use]
pub fn clamp_quantity(requested: u32, stock: u32) -> Option<u32> {
    (stock > 0).then(|| requested.clamp(1, stock))
}

/// Ordered line items, unique by product.
///
/// Order is insertion order. It matters for display only, never for pricing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from arbitrary lines, repairing anything that breaks the
    /// cart's invariants.
    ///
    /// - A repeated product keeps its first position and takes the later
    ///   line's quantity, price, and stock.
    /// - Lines with no stock are dropped.
    /// - Quantities are clamped to `1..=stock_available`.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut state = Self::new();
        for mut item in items {
            let Some(quantity) = clamp_quantity(item.quantity, item.stock_available) else {
                continue;
            };
            item.quantity = quantity;
            match state
                .items
                .iter_mut()
                .find(|existing| existing.product_id == item.product_id)
            {
                Some(existing) => *existing = item,
                None => state.items.push(item),
            }
        }
        state
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| &item.product_id == product_id)
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    pub(crate) fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product_id == product_id)
    }

    pub(crate) fn find_mut(&mut self, product_id: &ProductId) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
    }

    pub(crate) fn push(&mut self, item: LineItem) {
        self.items.push(item);
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> LineItem {
        self.items.remove(index)
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

impl From<Vec<LineItem>> for CartState {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<CartState> for Vec<LineItem> {
    fn from(state: CartState) -> Self {
        state.items
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: u32, stock: u32) -> LineItem {
        LineItem {
            product_id: ProductId::parse(id).unwrap(),
            name: id.to_uppercase(),
            image_ref: String::new(),
            unit_price: Money::from_major(10),
            quantity,
            stock_available: stock,
        }
    }

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(0, 5), Some(1));
        assert_eq!(clamp_quantity(3, 5), Some(3));
        assert_eq!(clamp_quantity(9, 5), Some(5));
        assert_eq!(clamp_quantity(1, 0), None);
    }

    #[test]
    fn test_from_items_merges_duplicates_in_first_position() {
        let state = CartState::from_items([line("a", 1, 5), line("b", 2, 5), line("a", 4, 5)]);
        let ids: Vec<_> = state.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(state.items()[0].quantity, 4);
    }

    #[test]
    fn test_from_items_repairs_quantities() {
        let state = CartState::from_items([line("a", 0, 5), line("b", 9, 3), line("c", 1, 0)]);
        assert_eq!(state.len(), 2);
        assert_eq!(state.items()[0].quantity, 1);
        assert_eq!(state.items()[1].quantity, 3);
        assert!(!state.contains(&ProductId::parse("c").unwrap()));
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let state = CartState::from_items([line("a", 2, 5), line("b", 3, 5)]);
        assert_eq!(state.item_count(), 5);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let json = r#"[
            {"product_id": "a", "name": "A", "unit_price": "10.00", "quantity": 7, "stock_available": 2},
            {"product_id": "a", "name": "A", "unit_price": "12.00", "quantity": 1, "stock_available": 2}
        ]"#;
        let state: CartState = serde_json::from_str(json).unwrap();
        assert_eq!(state.len(), 1);
        assert_eq!(state.items()[0].quantity, 1);
        assert_eq!(state.items()[0].unit_price, Money::from_major(12));
    }

    #[test]
    fn test_line_bounds() {
        let item = line("a", 1, 2);
        assert!(!item.can_decrement());
        assert!(item.can_increment());
        assert_eq!(item.line_total(), Money::from_major(10));
    }
}
