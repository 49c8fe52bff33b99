//! Persistence seam for cart state.
//!
//! The cart store calls [`CartRepository::save`] after every change and
//! [`CartRepository::load`] once when it is restored. Implementations decide
//! where state lives; the core ships only an in-memory one.

use thiserror::Error;

use crate::cart::CartState;

/// Errors a persistence collaborator can report.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing storage failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored cart could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store is not reachable right now.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Load/save access to a persisted cart.
pub trait CartRepository {
    /// Load the last saved cart. A store with nothing saved returns an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if stored state exists but cannot be read.
    fn load(&self) -> Result<CartState, PersistenceError>;

    /// Replace the saved cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the state could not be written.
    fn save(&mut self, cart: &CartState) -> Result<(), PersistenceError>;
}

impl<R: CartRepository + ?Sized> CartRepository for &mut R {
    fn load(&self) -> Result<CartState, PersistenceError> {
        (**self).load()
    }

    fn save(&mut self, cart: &CartState) -> Result<(), PersistenceError> {
        (**self).save(cart)
    }
}

impl<R: CartRepository + ?Sized> CartRepository for Box<R> {
    fn load(&self) -> Result<CartState, PersistenceError> {
        (**self).load()
    }

    fn save(&mut self, cart: &CartState) -> Result<(), PersistenceError> {
        (**self).save(cart)
    }
}

/// Repository that keeps the saved cart in memory.
///
/// Useful for embedding callers that persist elsewhere, and for tests: saves
/// can be switched to fail to exercise the unsaved-cart path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    saved: Option<CartState>,
    save_count: usize,
    fail_saves: bool,
}

impl InMemoryRepository {
    /// Start with a previously saved cart.
    #[must_use]
    pub const fn with_cart(cart: CartState) -> Self {
        Self {
            saved: Some(cart),
            save_count: 0,
            fail_saves: false,
        }
    }

    /// Make subsequent saves fail (or succeed again).
    pub const fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// The most recently saved cart, if any.
    #[must_use]
    pub const fn last_saved(&self) -> Option<&CartState> {
        self.saved.as_ref()
    }

    /// Number of successful saves.
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.save_count
    }
}

impl CartRepository for InMemoryRepository {
    fn load(&self) -> Result<CartState, PersistenceError> {
        Ok(self.saved.clone().unwrap_or_default())
    }

    fn save(&mut self, cart: &CartState) -> Result<(), PersistenceError> {
        if self.fail_saves {
            return Err(PersistenceError::Unavailable(
                "in-memory store is failing saves".to_string(),
            ));
        }
        self.saved = Some(cart.clone());
        self.save_count += 1;
        Ok(())
    }
}
