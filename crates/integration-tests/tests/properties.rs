//! Property tests for the cart store and pricing.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashSet;

use cartwheel_core::{CartState, Money, PricingPolicy, Product};
use cartwheel_integration_tests::{id, product, store};
use proptest::prelude::*;

/// One store operation against a small pool of products.
#[derive(Debug, Clone)]
enum Op {
    Add { slot: usize, price: i64, stock: u32, qty: u32 },
    Adjust { slot: usize, delta: i64 },
    Remove { slot: usize },
}

const SLOTS: usize = 5;

fn slot_id(slot: usize) -> String {
    format!("p{slot}")
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..SLOTS, 0i64..2000, 0u32..20, 0u32..40)
            .prop_map(|(slot, price, stock, qty)| Op::Add { slot, price, stock, qty }),
        2 => (0..SLOTS, -5i64..=5).prop_map(|(slot, delta)| Op::Adjust { slot, delta }),
        1 => (0..SLOTS).prop_map(|slot| Op::Remove { slot }),
    ]
}

fn assert_valid(cart: &CartState) -> Result<(), TestCaseError> {
    let mut ids = HashSet::new();
    for item in cart {
        prop_assert!(
            ids.insert(item.product_id.clone()),
            "duplicate line for {}",
            item.product_id
        );
        prop_assert!(item.quantity >= 1);
        prop_assert!(item.quantity <= item.stock_available);
    }
    Ok(())
}

proptest! {
    #[test]
    fn cart_lines_stay_unique_and_in_stock(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut store = store();
        for op in ops {
            match op {
                Op::Add { slot, price, stock, qty } => {
                    store.add_or_update(&product(&slot_id(slot), price, stock), qty);
                }
                Op::Adjust { slot, delta } => {
                    store.adjust_quantity(&id(&slot_id(slot)), delta);
                }
                Op::Remove { slot } => {
                    store.remove(&id(&slot_id(slot)));
                }
            }
            assert_valid(store.snapshot())?;
        }
    }

    #[test]
    fn adjust_applies_exactly_when_in_range(
        stock in 1u32..50,
        start in 1u32..50,
        delta in -60i64..60,
    ) {
        let mut store = store();
        store.add_or_update(&product("x", 10, stock), start);
        let before = store.snapshot().get(&id("x")).unwrap().quantity;

        let after = store.adjust_quantity(&id("x"), delta).get(&id("x")).unwrap().quantity;

        let target = i64::from(before) + delta;
        if (1..=i64::from(stock)).contains(&target) {
            prop_assert_eq!(i64::from(after), target);
        } else {
            prop_assert_eq!(after, before);
        }
        prop_assert!(after >= 1 && after <= stock);
    }

    #[test]
    fn summary_is_deterministic(
        lines in prop::collection::vec((0i64..5000, 1u32..20, 1u32..20), 0..SLOTS),
    ) {
        let mut store = store();
        for (slot, (price, stock, qty)) in lines.into_iter().enumerate() {
            store.add_or_update(&product(&slot_id(slot), price, stock), qty);
        }
        let policy = PricingPolicy::default();
        prop_assert_eq!(
            policy.compute_summary(store.snapshot()),
            policy.compute_summary(store.snapshot())
        );
    }

    #[test]
    fn summary_totals_add_up(
        lines in prop::collection::vec((0i64..5000, 1u32..20, 1u32..20), 0..SLOTS),
    ) {
        let mut store = store();
        for (slot, (price, stock, qty)) in lines.into_iter().enumerate() {
            store.add_or_update(&product(&slot_id(slot), price, stock), qty);
        }
        let summary = PricingPolicy::default().compute_summary(store.snapshot());
        prop_assert_eq!(summary.total, summary.subtotal + summary.shipping_fee + summary.tax);
        prop_assert_eq!(summary.item_count, store.snapshot().item_count());
    }

    #[test]
    fn free_shipping_only_above_threshold(cents in 0i64..500_000) {
        let policy = PricingPolicy::default();
        let subtotal = Money::from_cents(cents);
        let fee = policy.shipping_fee(subtotal);

        if cents > 100_000 {
            prop_assert_eq!(fee, Money::ZERO);
            prop_assert!(policy.free_shipping_gap(subtotal).is_zero());
        } else {
            prop_assert_eq!(fee, Money::from_major(100));
            prop_assert_eq!(
                policy.free_shipping_gap(subtotal),
                Money::from_cents(100_000 - cents)
            );
        }
    }

    #[test]
    fn recommendations_never_include_cart_items(
        in_cart in prop::collection::hash_set(0..SLOTS, 0..SLOTS),
        limit in 0usize..8,
    ) {
        let catalog: Vec<Product> = (0..SLOTS).map(|slot| product(&slot_id(slot), 10, 3)).collect();
        let page = cartwheel_integration_tests::page(&catalog);

        let mut store = store();
        for slot in &in_cart {
            store.add_or_update(&product(&slot_id(*slot), 10, 3), 1);
        }

        let picks = cartwheel_core::recommend(&page, store.snapshot(), limit);
        prop_assert!(picks.len() <= limit);
        prop_assert_eq!(picks.len(), limit.min(SLOTS - in_cart.len()));
        for pick in &picks {
            prop_assert!(!store.snapshot().contains(&pick.id));
        }
        // Catalog order is kept.
        let positions: Vec<_> = picks
            .iter()
            .filter_map(|p| catalog.iter().position(|c| c.id == p.id))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
