//! Cart resolution.
//!
//! Turns the lines a browser submits into processor line items, and works out
//! the subtotal, the parcel weight and whether the order can ship at all.
//!
//! # Rules
//!
//! 1. When shipping, pickup-only products (and all their variants) are removed.
//! 2. Shipping is allowed only when shipping was chosen and something is left.
//! 3. Lines whose product or price identifier is unknown are dropped silently.
//! 4. An empty list of line items is an error.
//! 5. Subtotal and weight are summed over the lines that survived step 1,
//!    including lines later dropped in step 3.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::types::{CartLine, Product, WeightTier, find_product, pickup_only_ids};

#[allow(clippy::unwrap_used)] // static pattern
static KILOGRAMS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)([0-9]+)kg").unwrap());

#[allow(clippy::unwrap_used)] // static pattern
static GRAMS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)([0-9]+)g").unwrap());

/// Errors for carts that cannot be checked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// The request contained no cart lines.
    #[error("No items in cart")]
    NoItems,

    /// None of the remaining lines has a known price identifier.
    #[error("No valid prices found for the items in the cart")]
    NoResolvablePrices,
}

/// A line item as sent to the payment processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    /// Processor price identifier.
    pub price: String,
    pub quantity: u32,
}

/// Outcome of resolving a cart against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCart {
    pub line_items: Vec<LineItem>,
    /// Minor currency units.
    pub subtotal: i64,
    pub total_weight_grams: u64,
    pub weight_tier: WeightTier,
    /// `false` for pickup orders and for carts that were all pickup-only.
    pub shipping_allowed: bool,
}

/// Resolve requested cart lines against the catalog.
///
/// # Errors
///
/// Returns [`CartError::NoItems`] for an empty request and
/// [`CartError::NoResolvablePrices`] when no line maps to a price identifier.
pub fn resolve_cart(
    lines: &[CartLine],
    pickup: bool,
    catalog: &[Product],
) -> Result<ResolvedCart, CartError> {
    if lines.is_empty() {
        return Err(CartError::NoItems);
    }

    let pickup_only = pickup_only_ids(catalog);
    let kept: Vec<&CartLine> = lines
        .iter()
        .filter(|line| pickup || !pickup_only.contains(line.id.as_str()))
        .collect();

    let shipping_allowed = !pickup && !kept.is_empty();

    let line_items: Vec<LineItem> = kept
        .iter()
        .filter_map(|line| {
            let product = find_product(catalog, &line.id)?;
            let price = product.price_id_for(&line.id)?;
            Some(LineItem {
                price: price.to_string(),
                quantity: line.qty,
            })
        })
        .collect();

    if line_items.is_empty() {
        return Err(CartError::NoResolvablePrices);
    }

    let subtotal = kept.iter().fold(0_i64, |sum, line| {
        let unit_price = find_product(catalog, &line.id)
            .and_then(|p| p.unit_price_for(&line.id))
            .unwrap_or(0);
        sum.saturating_add(unit_price.saturating_mul(i64::from(line.qty)))
    });

    let total_weight_grams = kept.iter().fold(0_u64, |sum, line| {
        sum.saturating_add(guess_weight_grams(&line.id).saturating_mul(u64::from(line.qty)))
    });

    Ok(ResolvedCart {
        line_items,
        subtotal,
        total_weight_grams,
        weight_tier: WeightTier::from_grams(total_weight_grams),
        shipping_allowed,
    })
}

/// Guess the weight of one unit from its identifier.
///
/// Looks for `<N>kg` first, then `<N>g`, case-insensitive, anywhere in the
/// identifier. Identifiers without a weight token weigh nothing.
#[must_use]
pub fn guess_weight_grams(id: &str) -> u64 {
    if let Some(kg) = captured_number(&KILOGRAMS, id) {
        return kg.saturating_mul(1_000);
    }
    captured_number(&GRAMS, id).unwrap_or(0)
}

fn captured_number(pattern: &Regex, id: &str) -> Option<u64> {
    pattern.captures(id)?.get(1)?.as_str().parse().ok()
}
