//! Offline cart quotes.
//!
//! Runs the same resolution and session-building rules as the server, against
//! a local catalog file, and prints the outcome instead of calling Stripe.

use std::path::Path;

use checkout_core::{
    CartLine, CheckoutSessionRequest, CurrencyCode, Price, RedirectUrls, ResolvedCart,
    ShippingOption, ShippingRates, resolve_cart,
};
use checkout_storefront::catalog::CatalogLoader;
use serde_json::json;

/// Parse a `--item` argument of the form `id` or `id:qty`.
///
/// # Errors
///
/// Returns a message for an empty id or a quantity that is not a positive
/// integer.
pub fn parse_line(arg: &str) -> Result<CartLine, String> {
    let (id, qty) = match arg.rsplit_once(':') {
        Some((id, qty)) => {
            let qty = qty
                .parse::<u32>()
                .ok()
                .filter(|&q| q > 0)
                .ok_or_else(|| format!("invalid quantity '{qty}' (expected a positive integer)"))?;
            (id, qty)
        }
        None => (arg, 1),
    };

    if id.trim().is_empty() {
        return Err("item id must not be empty".to_string());
    }

    Ok(CartLine::new(id.trim(), qty))
}

/// Resolve `lines` against the catalog at `path` and print the quote.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the cart has no
/// resolvable line items.
pub async fn run(
    lines: &[CartLine],
    pickup: bool,
    path: &Path,
    frontend_url: &str,
    as_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = CatalogLoader::new(path).try_load().await?;
    let cart = resolve_cart(lines, pickup, &catalog)?;
    let request = CheckoutSessionRequest::build(
        &cart,
        &ShippingRates::default(),
        &RedirectUrls::from_frontend(frontend_url),
    );

    if as_json {
        let output = json!({ "cart": cart, "session": request });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in summary(&cart, &request) {
            println!("{line}");
        }
    }

    Ok(())
}

fn summary(cart: &ResolvedCart, request: &CheckoutSessionRequest) -> Vec<String> {
    let mut out = vec!["Line items:".to_string()];
    out.extend(
        cart.line_items
            .iter()
            .map(|item| format!("  {} x {}", item.quantity, item.price)),
    );

    out.push(format!(
        "Subtotal:  {}",
        Price::from_minor_units(cart.subtotal, CurrencyCode::EUR)
    ));
    out.push(format!(
        "Weight:    {} g (tier {})",
        cart.total_weight_grams, cart.weight_tier
    ));

    for option in &request.shipping_options {
        out.push(match option {
            ShippingOption::Rate { rate_id } => format!("Shipping:  rate {rate_id}"),
            ShippingOption::FixedAmount {
                display_name,
                amount,
                currency,
            } => format!(
                "Shipping:  {display_name} ({})",
                Price::from_minor_units(*amount, *currency)
            ),
        });
    }

    if let Some(countries) = &request.allowed_countries {
        out.push(format!("Ships to:  {}", countries.join(", ")));
    }

    out
}
