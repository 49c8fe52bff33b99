//! Order summary derivation.
//!
//! Every figure is derived from the cart on demand and never stored:
//!
//! ```text
//! subtotal = Σ quantity × unit_price
//! shipping = 0 if subtotal > free_shipping_threshold else flat_shipping_fee
//! tax      = subtotal × tax_rate   (rounded to whole cents, half away from zero)
//! total    = subtotal + shipping + tax
//! ```
//!
//! The threshold comparison is strict: a subtotal exactly at the threshold
//! still pays shipping.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartState;
use crate::types::{CurrencyCode, Money};

/// Subtotal above which shipping is free, in major units.
pub const FREE_SHIPPING_THRESHOLD: i64 = 1000;

/// Shipping fee charged at or below the threshold, in major units.
pub const FLAT_SHIPPING_FEE: i64 = 100;

/// Tax rate in percent.
pub const TAX_RATE_PERCENT: i64 = 18;

/// Pricing rules applied to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub free_shipping_threshold: Money,
    pub flat_shipping_fee: Money,
    /// Fraction of the subtotal charged as tax (`0.18` for 18%).
    pub tax_rate: Decimal,
    pub currency: CurrencyCode,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Money::from_major(FREE_SHIPPING_THRESHOLD),
            flat_shipping_fee: Money::from_major(FLAT_SHIPPING_FEE),
            tax_rate: Decimal::new(TAX_RATE_PERCENT, 2),
            currency: CurrencyCode::default(),
        }
    }
}

/// Derived totals for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSummary {
    pub subtotal: Money,
    pub shipping_fee: Money,
    pub tax: Money,
    pub total: Money,
    /// Units across all lines.
    pub item_count: u64,
    /// Amount still needed to reach free shipping; zero once it applies.
    pub free_shipping_gap: Money,
}

impl PricingSummary {
    /// Returns `true` if no shipping fee is charged.
    #[must_use]
    pub const fn has_free_shipping(&self) -> bool {
        self.shipping_fee.is_zero()
    }
}

impl PricingPolicy {
    /// Derive the order summary for a cart.
    ///
    /// Pure: the same cart always yields the same summary.
    #[must_use]
    pub fn compute_summary(&self, cart: &CartState) -> PricingSummary {
        let subtotal = Self::subtotal(cart);
        let shipping_fee = self.shipping_fee(subtotal);
        let tax = self.tax(subtotal);

        PricingSummary {
            subtotal,
            shipping_fee,
            tax,
            total: subtotal + shipping_fee + tax,
            item_count: cart.item_count(),
            free_shipping_gap: self.free_shipping_gap(subtotal),
        }
    }

    /// `Σ quantity × unit_price` over every line.
    #[must_use]
    pub fn subtotal(cart: &CartState) -> Money {
        cart.iter().map(crate::cart::LineItem::line_total).sum()
    }

    /// Shipping owed for a subtotal.
    #[must_use]
    pub fn shipping_fee(&self, subtotal: Money) -> Money {
        if self.qualifies_for_free_shipping(subtotal) {
            Money::ZERO
        } else {
            self.flat_shipping_fee
        }
    }

    /// Tax owed on a subtotal.
    #[must_use]
    pub fn tax(&self, subtotal: Money) -> Money {
        subtotal.apply_rate(self.tax_rate)
    }

    /// Returns `true` if the subtotal is strictly above the threshold.
    #[must_use]
    pub fn qualifies_for_free_shipping(&self, subtotal: Money) -> bool {
        subtotal > self.free_shipping_threshold
    }

    /// `max(0, threshold - subtotal)`.
    ///
    /// Reaches zero at the threshold itself, even though shipping is only
    /// waived above it.
    #[must_use]
    pub const fn free_shipping_gap(&self, subtotal: Money) -> Money {
        self.free_shipping_threshold.saturating_sub(subtotal)
    }
}
