//! Session-gated checkout handoff.
//!
//! The core never authenticates. It only decides, from whether a session is
//! present, if checkout can proceed or the shopper must sign in first. The
//! cart is cleared once the caller confirms the handoff.

use thiserror::Error;
use tracing::info;

use crate::cart::{CartState, CartStore};
use crate::persistence::CartRepository;
use crate::pricing::{PricingPolicy, PricingSummary};

/// Credential-collection route that resumes at shipping once signed in.
pub const LOGIN_PATH: &str = "/login?redirect=/shipping";

/// Reasons checkout cannot start.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing to check out.
    #[error("cannot check out an empty cart")]
    EmptyCart,
}

/// What the caller should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Hand the order off with these totals.
    Proceed { summary: PricingSummary },
    /// Send the shopper to sign in; they return to checkout afterwards.
    SignInRequired { login_path: &'static str },
}

/// Decide whether checkout can start.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
pub fn begin_checkout(
    cart: &CartState,
    policy: &PricingPolicy,
    has_session: bool,
) -> Result<CheckoutStep, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    if !has_session {
        info!(lines = cart.len(), "Checkout requires sign-in");
        return Ok(CheckoutStep::SignInRequired {
            login_path: LOGIN_PATH,
        });
    }

    let summary = policy.compute_summary(cart);
    info!(lines = cart.len(), total = %summary.total, "Checkout ready");
    Ok(CheckoutStep::Proceed { summary })
}

/// Clear the cart after the checkout collaborator accepted the order.
pub fn complete_handoff<R: CartRepository>(store: &mut CartStore<R>) -> &CartState {
    info!(
        lines = store.snapshot().len(),
        "Checkout handed off, clearing cart"
    );
    store.clear()
}
