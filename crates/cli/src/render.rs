//! Plain-text views of the cart, summary, and recommendations.

use std::fmt::Write;

use cartwheel_core::{CartState, PricingPolicy, PricingSummary, Product};
use rust_decimal::Decimal;

/// Cart lines, or the empty-cart message.
#[must_use]
pub fn cart(cart: &CartState, policy: &PricingPolicy) -> String {
    if cart.is_empty() {
        return "Your cart is empty.\nLooks like you haven't added anything to your cart yet.\n"
            .to_string();
    }

    let mut out = String::from("Shopping Cart\n");
    for (n, item) in cart.iter().enumerate() {
        let stock = if item.in_stock() {
            "In Stock"
        } else {
            "Out of Stock"
        };
        let _ = writeln!(
            out,
            "  {}. {} [{}]  {} x {} = {}  ({stock}, {} available)",
            n + 1,
            item.name,
            item.product_id,
            item.unit_price.format(policy.currency),
            item.quantity,
            item.line_total().format(policy.currency),
            item.stock_available,
        );
    }
    out
}

/// Order summary block with the free-shipping nudge.
#[must_use]
pub fn summary(summary: &PricingSummary, policy: &PricingPolicy) -> String {
    let currency = policy.currency;
    let shipping = if summary.has_free_shipping() {
        "Free".to_string()
    } else {
        summary.shipping_fee.format(currency)
    };
    let tax_percent = (policy.tax_rate * Decimal::ONE_HUNDRED).normalize();

    let mut out = String::from("Order Summary\n");
    let _ = writeln!(
        out,
        "  Subtotal ({} items)  {}",
        summary.item_count,
        summary.subtotal.format(currency)
    );
    let _ = writeln!(out, "  Shipping  {shipping}");
    let _ = writeln!(
        out,
        "  Tax ({tax_percent}%)  {}",
        summary.tax.format(currency)
    );
    let _ = writeln!(out, "  Total  {}", summary.total.format(currency));

    if !summary.has_free_shipping() && !summary.free_shipping_gap.is_zero() {
        let _ = writeln!(
            out,
            "Add items worth {} more to get free shipping!",
            summary.free_shipping_gap.format(currency)
        );
    }
    out
}

/// "You May Also Like" strip.
#[must_use]
pub fn recommendations(products: &[&Product], policy: &PricingPolicy) -> String {
    if products.is_empty() {
        return String::new();
    }

    let mut out = String::from("You May Also Like\n");
    for product in products {
        let availability = if product.in_stock() {
            ""
        } else {
            "  (out of stock)"
        };
        let _ = writeln!(
            out,
            "  - {} [{}]  {}{availability}",
            product.name,
            product.id,
            product.unit_price.format(policy.currency),
        );
    }
    out
}
