//! Stripe webhook endpoint.

use axum::{body::Bytes, extract::State, http::HeaderMap};

use crate::error::Result;
use crate::state::AppState;
use crate::webhook::{SIGNATURE_HEADER, WebhookError};

/// Acknowledgement body for accepted deliveries.
pub const ACK: &str = "Webhook received";

/// `POST /webhook`
///
/// Takes the raw body so the signature is checked against the exact bytes
/// Stripe sent.
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .ok_or(WebhookError::MissingHeader)?
        .to_str()
        .map_err(|e| WebhookError::MalformedHeader(e.to_string()))?;

    let event = state.webhooks().verify(&body, signature)?;

    if let Some(session_id) = event.completed_session_id() {
        tracing::info!(event_id = %event.id, session_id = %session_id, "Checkout session completed");
    } else {
        tracing::debug!(event_id = %event.id, kind = %event.kind, "Ignoring webhook event");
    }

    Ok(ACK)
}
