//! Stripe API client for hosted checkout sessions.
//!
//! Only the one call the storefront needs is implemented: creating a
//! Checkout Session and returning its redirect URL. Requests are
//! form-encoded with Stripe's bracket notation for nested parameters.

mod client;
mod error;
pub mod types;

pub use client::{StripeClient, encode_session_params};
pub use error::StripeError;
pub use types::CheckoutSession;
