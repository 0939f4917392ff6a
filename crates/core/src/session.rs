//! Checkout session requests.
//!
//! A [`CheckoutSessionRequest`] is the processor-neutral description of the
//! hosted checkout page to create. The storefront's Stripe client encodes it
//! for the wire.

use serde::Serialize;

use crate::resolve::{LineItem, ResolvedCart};
use crate::types::{CurrencyCode, ShippingRates};

/// Countries a shipped order may be delivered to.
pub const EU_SHIPPING_COUNTRIES: [&str; 27] = [
    "AT", "BE", "BG", "HR", "CY", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IE", "IT", "LV",
    "LT", "LU", "MT", "NL", "PL", "PT", "RO", "SK", "SI", "ES", "SE",
];

/// Label of the free shipping option shown for pickup orders.
pub const PICKUP_DISPLAY_NAME: &str = "Pickup in store only";

/// Where the processor sends the customer after paying or cancelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectUrls {
    pub success_url: String,
    pub cancel_url: String,
}

impl RedirectUrls {
    /// Success and cancel pages under the public frontend URL.
    #[must_use]
    pub fn from_frontend(frontend_url: &str) -> Self {
        let base = frontend_url.trim_end_matches('/');
        Self {
            success_url: format!("{base}/success.html"),
            cancel_url: format!("{base}/cancel.html"),
        }
    }
}

/// How the order leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShippingOption {
    /// A shipping rate registered with the processor.
    Rate { rate_id: String },
    /// An ad-hoc fixed amount option, used for in-store pickup.
    FixedAmount {
        display_name: String,
        amount: i64,
        currency: CurrencyCode,
    },
}

impl ShippingOption {
    /// The zero-cost pickup placeholder.
    #[must_use]
    pub fn pickup() -> Self {
        Self::FixedAmount {
            display_name: PICKUP_DISPLAY_NAME.to_string(),
            amount: 0,
            currency: CurrencyCode::EUR,
        }
    }

    /// Pick the shipping option for a resolved cart.
    #[must_use]
    pub fn for_cart(cart: &ResolvedCart, rates: &ShippingRates) -> Self {
        if cart.shipping_allowed {
            Self::Rate {
                rate_id: rates.select(cart.subtotal, cart.weight_tier).to_string(),
            }
        } else {
            Self::pickup()
        }
    }
}

/// A one-time card payment checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSessionRequest {
    pub line_items: Vec<LineItem>,
    pub allow_promotion_codes: bool,
    pub redirect: RedirectUrls,
    /// Countries to collect a shipping address for; `None` for pickup.
    pub allowed_countries: Option<Vec<String>>,
    pub shipping_options: Vec<ShippingOption>,
}

impl CheckoutSessionRequest {
    /// Build the session request for a resolved cart.
    ///
    /// Shipped orders collect an EU address and get a registered rate; pickup
    /// orders (and carts that were all pickup-only) get the free pickup option.
    #[must_use]
    pub fn build(cart: &ResolvedCart, rates: &ShippingRates, redirect: &RedirectUrls) -> Self {
        let allowed_countries = cart
            .shipping_allowed
            .then(|| EU_SHIPPING_COUNTRIES.iter().map(ToString::to_string).collect());

        Self {
            line_items: cart.line_items.clone(),
            allow_promotion_codes: true,
            redirect: redirect.clone(),
            allowed_countries,
            shipping_options: vec![ShippingOption::for_cart(cart, rates)],
        }
    }
}
