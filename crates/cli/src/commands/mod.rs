//! Command handlers.
//!
//! Each handler takes the shared [`Context`], applies its change through the
//! cart store, and returns the text to print.

pub mod cart;
pub mod checkout;

use cartwheel_core::{CartRepository, CartStore, CheckoutError};
use thiserror::Error;
use tracing::warn;

use crate::catalog::{CatalogClient, CatalogError};
use crate::config::CliConfig;

/// Errors a command can fail with.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Talking to the catalog failed where the command cannot do without it.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout could not start.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Everything a command needs.
pub struct Context<R: CartRepository> {
    pub config: CliConfig,
    pub catalog: CatalogClient,
    pub store: CartStore<R>,
}

impl<R: CartRepository> Context<R> {
    /// Note an unsaved cart in the command output.
    fn saved_notice(&self, out: &mut String) {
        if self.store.save_status().is_degraded() {
            warn!("Cart change is not saved");
            out.push_str("Warning: your cart could not be saved; changes will be lost on exit.\n");
        }
    }
}
