//! Checkout handoff command.

use cartwheel_core::{CartRepository, CheckoutStep, begin_checkout, complete_handoff};
use tracing::instrument;

use super::{CommandError, Context};
use crate::render;

/// Start checkout.
///
/// With a session the order summary is handed off and the cart cleared.
/// Without one the shopper is pointed at the sign-in route.
///
/// # Errors
///
/// Returns [`CommandError::Checkout`] if the cart is empty.
#[instrument(skip(ctx))]
pub fn checkout<R: CartRepository>(ctx: &mut Context<R>) -> Result<String, CommandError> {
    let policy = ctx.config.pricing;
    let step = begin_checkout(ctx.store.snapshot(), &policy, ctx.config.has_session())?;

    match step {
        CheckoutStep::Proceed { summary } => {
            let mut out = render::summary(&summary, &policy);
            complete_handoff(&mut ctx.store);
            out.push_str("Order handed off to checkout. Your cart is now empty.\n");
            ctx.saved_notice(&mut out);
            Ok(out)
        }
        CheckoutStep::SignInRequired { login_path } => Ok(format!(
            "Sign in to continue to checkout: {login_path}\n\
             Set CARTWHEEL_SESSION_TOKEN once signed in and run `cartwheel checkout` again.\n"
        )),
    }
}
