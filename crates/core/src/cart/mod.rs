//! The cart store and the state it owns.
//!
//! [`CartStore`] is the single owner of a shopper's [`CartState`]. Every
//! mutation goes through it, is clamped to the stock snapshot it was given, and
//! is then saved and announced to listeners. Readers get `&CartState`.

mod state;
mod store;

pub use state::{CartState, LineItem, clamp_quantity};
pub use store::{CartEvent, CartStore};
