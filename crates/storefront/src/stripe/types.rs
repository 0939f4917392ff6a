//! Stripe API response types.

use serde::Deserialize;

/// A created Checkout Session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Session ID (`cs_...`).
    pub id: String,
    /// Hosted checkout page URL.
    pub url: String,
}

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
