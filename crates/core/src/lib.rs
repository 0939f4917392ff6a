//! Checkout Core - catalog types and checkout rules.
//!
//! This crate holds everything about a checkout that can be decided without
//! touching the network or the filesystem:
//!
//! - [`types`] - Products, variants, cart lines, prices and shipping rate tables
//! - [`resolve`] - Turning requested cart lines into processor line items
//! - [`session`] - Building the checkout session request from a resolved cart
//!
//! # Architecture
//!
//! No I/O lives here. The storefront crate loads the catalog, talks to the
//! payment processor and verifies webhooks; the CLI reuses the same rules for
//! offline quotes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod resolve;
pub mod session;
pub mod types;

pub use resolve::{CartError, LineItem, ResolvedCart, guess_weight_grams, resolve_cart};
pub use session::{CheckoutSessionRequest, RedirectUrls, ShippingOption};
pub use types::*;
