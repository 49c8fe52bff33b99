//! The owned, persisted cart store.

use std::fmt;

use tracing::{debug, warn};

use super::state::{CartState, LineItem, clamp_quantity};
use crate::persistence::CartRepository;
use crate::types::{Product, ProductId, SaveStatus};

/// A change that was applied to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line was appended.
    Added {
        product_id: ProductId,
        quantity: u32,
    },
    /// An existing line's quantity, price, or stock snapshot changed.
    Updated {
        product_id: ProductId,
        quantity: u32,
    },
    /// A line was removed.
    Removed { product_id: ProductId },
    /// Every line was removed.
    Cleared,
}

type Listener = Box<dyn FnMut(&CartEvent, &CartState)>;

/// Owner of the shopper's cart.
///
/// Mutations never fail: out-of-range quantities are clamped or ignored so
/// the cart is always valid. After each applied change the store saves
/// through its repository and then calls every listener. A failed save is
/// logged and reflected in [`CartStore::save_status`]; the change itself
/// stands.
pub struct CartStore<R: CartRepository> {
    state: CartState,
    repository: R,
    save_status: SaveStatus,
    listeners: Vec<Listener>,
}

impl<R: CartRepository> CartStore<R> {
    /// Create a store with an empty cart.
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self {
            state: CartState::new(),
            repository,
            save_status: SaveStatus::Clean,
            listeners: Vec::new(),
        }
    }

    /// Create a store from the repository's saved cart.
    ///
    /// If loading fails the store starts empty; the saved data is left alone
    /// until the next change overwrites it.
    #[must_use]
    pub fn restore(repository: R) -> Self {
        let state = match repository.load() {
            Ok(state) => {
                debug!(items = state.len(), "Restored saved cart");
                state
            }
            Err(e) => {
                warn!(error = %e, "Failed to load saved cart, starting empty");
                CartState::new()
            }
        };

        Self {
            state,
            repository,
            save_status: SaveStatus::Clean,
            listeners: Vec::new(),
        }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn snapshot(&self) -> &CartState {
        &self.state
    }

    /// Outcome of the most recent save.
    #[must_use]
    pub const fn save_status(&self) -> SaveStatus {
        self.save_status
    }

    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Consume the store, returning its repository.
    pub fn into_repository(self) -> R {
        self.repository
    }

    /// Register a callback invoked after every applied change.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartEvent, &CartState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Add a product or replace the quantity of the line already holding it.
    ///
    /// The quantity is clamped to `1..=product.stock_available`. An existing
    /// line keeps its position, name, and image, and takes the snapshot's
    /// price and stock. A product with no stock is never added; if it was
    /// already in the cart, its line is removed.
    pub fn add_or_update(&mut self, product: &Product, requested: u32) -> &CartState {
        let Some(quantity) = clamp_quantity(requested, product.stock_available) else {
            if let Some(index) = self.state.position(&product.id) {
                self.state.remove_at(index);
                warn!(product_id = %product.id, "Product is out of stock, removed from cart");
                self.commit(&CartEvent::Removed {
                    product_id: product.id.clone(),
                });
            } else {
                warn!(product_id = %product.id, "Ignoring add of out-of-stock product");
            }
            return &self.state;
        };

        if quantity != requested {
            debug!(
                product_id = %product.id,
                requested,
                quantity,
                stock = product.stock_available,
                "Clamped requested quantity"
            );
        }

        let event = if let Some(item) = self.state.find_mut(&product.id) {
            if item.quantity == quantity
                && item.unit_price == product.unit_price
                && item.stock_available == product.stock_available
            {
                return &self.state;
            }
            item.quantity = quantity;
            item.unit_price = product.unit_price;
            item.stock_available = product.stock_available;
            CartEvent::Updated {
                product_id: product.id.clone(),
                quantity,
            }
        } else {
            let Some(item) = LineItem::from_product(product, quantity) else {
                return &self.state;
            };
            self.state.push(item);
            CartEvent::Added {
                product_id: product.id.clone(),
                quantity,
            }
        };

        self.commit(&event);
        &self.state
    }

    /// Remove a product's line. Unknown products are ignored.
    pub fn remove(&mut self, product_id: &ProductId) -> &CartState {
        let Some(index) = self.state.position(product_id) else {
            debug!(product_id = %product_id, "Remove of product not in cart ignored");
            return &self.state;
        };

        self.state.remove_at(index);
        self.commit(&CartEvent::Removed {
            product_id: product_id.clone(),
        });
        &self.state
    }

    /// Change a line's quantity by `delta`.
    ///
    /// Applied only when the result stays within `1..=stock_available`;
    /// otherwise, or for an unknown product, nothing changes.
    pub fn adjust_quantity(&mut self, product_id: &ProductId, delta: i64) -> &CartState {
        let Some(item) = self.state.find_mut(product_id) else {
            debug!(product_id = %product_id, "Adjust of product not in cart ignored");
            return &self.state;
        };

        let stock = item.stock_available;
        let new_quantity = i64::from(item.quantity)
            .checked_add(delta)
            .filter(|q| (1..=i64::from(stock)).contains(q))
            .and_then(|q| u32::try_from(q).ok());

        let Some(quantity) = new_quantity else {
            debug!(
                product_id = %product_id,
                current = item.quantity,
                delta,
                stock,
                "Quantity adjustment out of range, ignored"
            );
            return &self.state;
        };

        if quantity == item.quantity {
            return &self.state;
        }
        item.quantity = quantity;

        self.commit(&CartEvent::Updated {
            product_id: product_id.clone(),
            quantity,
        });
        &self.state
    }

    /// Remove every line. Called once a checkout handoff has been accepted.
    pub fn clear(&mut self) -> &CartState {
        if self.state.is_empty() {
            return &self.state;
        }

        self.state.clear();
        self.commit(&CartEvent::Cleared);
        &self.state
    }

    fn commit(&mut self, event: &CartEvent) {
        debug!(?event, lines = self.state.len(), "Cart changed");

        self.save_status = match self.repository.save(&self.state) {
            Ok(()) => SaveStatus::Saved,
            Err(e) => {
                warn!(error = %e, "Failed to save cart, keeping unsaved changes in memory");
                SaveStatus::Unsaved
            }
        };

        for listener in &mut self.listeners {
            listener(event, &self.state);
        }
    }
}

impl<R: CartRepository + fmt::Debug> fmt::Debug for CartStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("repository", &self.repository)
            .field("save_status", &self.save_status)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
