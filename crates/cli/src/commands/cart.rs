//! Cart viewing and editing commands.

use std::fmt::Write;

use cartwheel_core::{CartRepository, ProductId, recommend as pick_recommendations};
use tracing::{instrument, warn};

use super::{CommandError, Context};
use crate::render;

/// Show the cart, its summary, and recommendations.
///
/// Recommendations are best effort: if the catalog cannot be reached the rest
/// of the view is still shown.
// Not `Send`: the store's listeners are not `Sync`. Commands run on the main task.
#[allow(clippy::future_not_send)]
#[instrument(skip(ctx))]
pub async fn show<R: CartRepository>(ctx: &Context<R>) -> String {
    let policy = ctx.config.pricing;
    let cart = ctx.store.snapshot();

    let mut out = render::cart(cart, &policy);
    out.push('\n');
    out.push_str(&render::summary(&policy.compute_summary(cart), &policy));

    if cart.is_empty() {
        return out;
    }

    match ctx.catalog.fetch_page(ctx.config.recommend_limit).await {
        Ok(page) => {
            let picks = pick_recommendations(&page, cart, ctx.config.recommend_limit);
            let strip = render::recommendations(&picks, &policy);
            if !strip.is_empty() {
                out.push('\n');
                out.push_str(&strip);
            }
        }
        Err(e) => {
            warn!(error = %e, "Recommendations unavailable");
        }
    }
    out
}

/// Add a product, or set its quantity if it is already in the cart.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched from the catalog.
#[allow(clippy::future_not_send)]
#[instrument(skip(ctx, id), fields(product_id = %id))]
pub async fn add<R: CartRepository>(
    ctx: &mut Context<R>,
    id: &ProductId,
    quantity: u32,
) -> Result<String, CommandError> {
    let product = ctx.catalog.fetch_product(id).await?;

    let before = ctx.store.snapshot().get(id).map(|item| item.quantity);
    let after = ctx
        .store
        .add_or_update(&product, quantity)
        .get(id)
        .map(|item| item.quantity);

    let mut out = match (before, after) {
        (None, None) => format!("{} is out of stock.\n", product.name),
        (Some(_), None) => format!(
            "{} is out of stock and was removed from your cart.\n",
            product.name
        ),
        (None, Some(q)) => format!("Added {} x {q} to your cart.\n", product.name),
        (Some(b), Some(q)) if b == q => {
            format!("{} is already in your cart x {q}.\n", product.name)
        }
        (Some(_), Some(q)) => format!("Updated {} to {q}.\n", product.name),
    };

    if after.is_some_and(|q| q < quantity) {
        let _ = writeln!(
            out,
            "Only {} in stock; quantity limited.",
            product.stock_available
        );
    }

    ctx.saved_notice(&mut out);
    Ok(out)
}

/// Remove a product from the cart.
#[instrument(skip(ctx, id), fields(product_id = %id))]
pub fn remove<R: CartRepository>(ctx: &mut Context<R>, id: &ProductId) -> String {
    let Some(name) = ctx.store.snapshot().get(id).map(|item| item.name.clone()) else {
        return format!("{id} is not in your cart.\n");
    };

    ctx.store.remove(id);
    let mut out = format!("Removed {name} from your cart.\n");
    ctx.saved_notice(&mut out);
    out
}

/// Step a line's quantity up or down.
#[instrument(skip(ctx, id), fields(product_id = %id))]
pub fn adjust<R: CartRepository>(ctx: &mut Context<R>, id: &ProductId, delta: i64) -> String {
    let Some(before) = ctx.store.snapshot().get(id).cloned() else {
        return format!("{id} is not in your cart.\n");
    };

    let after = ctx
        .store
        .adjust_quantity(id, delta)
        .get(id)
        .map_or(before.quantity, |item| item.quantity);

    if after == before.quantity {
        return format!(
            "{} stays at {after} (allowed: 1 to {}).\n",
            before.name, before.stock_available
        );
    }

    let mut out = format!("{} quantity is now {after}.\n", before.name);
    ctx.saved_notice(&mut out);
    out
}

/// Empty the cart.
#[instrument(skip(ctx))]
pub fn clear<R: CartRepository>(ctx: &mut Context<R>) -> String {
    if ctx.store.snapshot().is_empty() {
        return "Your cart is already empty.\n".to_string();
    }

    ctx.store.clear();
    let mut out = "Cart cleared.\n".to_string();
    ctx.saved_notice(&mut out);
    out
}

/// List catalog products not already in the cart.
///
/// # Errors
///
/// Returns an error if the catalog page cannot be fetched.
#[allow(clippy::future_not_send)]
#[instrument(skip(ctx))]
pub async fn recommend<R: CartRepository>(
    ctx: &Context<R>,
    limit: Option<usize>,
) -> Result<String, CommandError> {
    let limit = limit.unwrap_or(ctx.config.recommend_limit);
    let page = ctx.catalog.fetch_page(limit).await?;
    let picks = pick_recommendations(&page, ctx.store.snapshot(), limit);

    if picks.is_empty() {
        return Ok("No recommendations right now.\n".to_string());
    }
    Ok(render::recommendations(&picks, &ctx.config.pricing))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartwheel_core::{CartStore, InMemoryRepository, Product, SaveStatus};
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::{CatalogClient, CatalogError};
    use crate::config::CliConfig;
    use crate::test_support::{CannedCatalog, UNREACHABLE_API, page_json, product_json};

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    /// A context holding one desk lamp (price 1200, stock 2).
    fn context(api_url: &str, repo: InMemoryRepository) -> Context<InMemoryRepository> {
        let lookup = |key: &str| (key == "CARTWHEEL_API_URL").then(|| api_url.to_string());
        let config = CliConfig::from_lookup(lookup).unwrap();
        let catalog = CatalogClient::new(config.api_url.clone()).unwrap();
        let mut store = CartStore::new(repo);
        store.add_or_update(
            &Product::new(id("lamp"), "Desk Lamp", Decimal::new(1200, 0), 2),
            1,
        );
        Context {
            config,
            catalog,
            store,
        }
    }

    fn offline() -> Context<InMemoryRepository> {
        context(UNREACHABLE_API, InMemoryRepository::default())
    }

    #[test]
    fn test_adjust_reports_new_quantity() {
        let mut ctx = offline();
        assert_eq!(
            adjust(&mut ctx, &id("lamp"), 1),
            "Desk Lamp quantity is now 2.\n"
        );
    }

    #[test]
    fn test_adjust_at_bound_is_reported() {
        let mut ctx = offline();
        assert_eq!(
            adjust(&mut ctx, &id("lamp"), -1),
            "Desk Lamp stays at 1 (allowed: 1 to 2).\n"
        );
    }

    #[test]
    fn test_remove_unknown() {
        let mut ctx = offline();
        assert_eq!(remove(&mut ctx, &id("nope")), "nope is not in your cart.\n");
        assert_eq!(ctx.store.snapshot().len(), 1);
    }

    #[test]
    fn test_remove_then_clear() {
        let mut ctx = offline();
        assert_eq!(
            remove(&mut ctx, &id("lamp")),
            "Removed Desk Lamp from your cart.\n"
        );
        assert_eq!(clear(&mut ctx), "Your cart is already empty.\n");
    }

    #[test]
    fn test_unsaved_change_is_flagged() {
        let mut repo = InMemoryRepository::default();
        repo.set_fail_saves(true);
        let mut ctx = context(UNREACHABLE_API, repo);
        let out = clear(&mut ctx);
        assert!(out.starts_with("Cart cleared."));
        assert!(out.contains("could not be saved"));
    }

    #[tokio::test]
    async fn test_show_without_catalog_keeps_cart_and_summary() {
        let ctx = offline();
        let out = show(&ctx).await;

        assert!(out.contains("Desk Lamp [lamp]"));
        assert!(out.contains("Order Summary"));
        assert!(out.contains("Total  ₹1,416.00"));
        assert!(!out.contains("You May Also Like"));
    }

    #[tokio::test]
    async fn test_recommend_without_catalog_fails() {
        let ctx = offline();
        let result = recommend(&ctx, None).await;
        assert!(matches!(result, Err(CommandError::Catalog(_))));
    }

    #[tokio::test]
    async fn test_add_without_catalog_leaves_cart() {
        let mut ctx = offline();
        let result = add(&mut ctx, &id("mug"), 1).await;

        assert!(matches!(
            result,
            Err(CommandError::Catalog(CatalogError::Http(_)))
        ));
        assert_eq!(ctx.store.snapshot().len(), 1);
        assert_eq!(ctx.store.save_status(), SaveStatus::Saved);
    }

    #[tokio::test]
    async fn test_add_unknown_product_leaves_cart() {
        let catalog = CannedCatalog::start(Vec::new()).await;
        let mut ctx = context(catalog.api_url.as_str(), InMemoryRepository::default());
        let result = add(&mut ctx, &id("ghost"), 1).await;

        assert!(matches!(
            result,
            Err(CommandError::Catalog(CatalogError::NotFound(_)))
        ));
        assert_eq!(ctx.store.snapshot().len(), 1);
        assert!(!ctx.store.snapshot().contains(&id("ghost")));
    }

    #[tokio::test]
    async fn test_add_limits_quantity_to_stock() {
        let routes = vec![(
            "/api/products/mug",
            200,
            product_json("mug", "Mug", 150, 3).to_string(),
        )];
        let catalog = CannedCatalog::start(routes).await;
        let mut ctx = context(catalog.api_url.as_str(), InMemoryRepository::default());

        let out = add(&mut ctx, &id("mug"), 5).await.unwrap();
        assert_eq!(
            out,
            "Added Mug x 3 to your cart.\nOnly 3 in stock; quantity limited.\n"
        );
        assert_eq!(ctx.store.snapshot().get(&id("mug")).unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_show_lists_recommendations() {
        let page = page_json(&[
            product_json("lamp", "Desk Lamp", 1200, 2),
            product_json("mug", "Mug", 150, 3),
        ]);
        let routes = vec![("/api/products?limit=4", 200, page)];
        let catalog = CannedCatalog::start(routes).await;
        let ctx = context(catalog.api_url.as_str(), InMemoryRepository::default());

        let out = show(&ctx).await;
        let (_, strip) = out.split_once("You May Also Like\n").unwrap();
        assert!(strip.contains("Mug [mug]  ₹150.00"));
        assert!(!strip.contains("[lamp]"));
    }
}
