//! Stripe-related errors.

use thiserror::Error;

/// Errors that can occur when calling the Stripe API.
#[derive(Debug, Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("Stripe request failed: {0}")]
    Request(String),

    /// Failed to parse response.
    #[error("Stripe response error: {0}")]
    Response(String),

    /// Stripe API returned an error.
    #[error("Stripe API error ({status}): {message}")]
    Api { status: u16, message: String },
}
