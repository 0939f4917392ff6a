//! Checkout session creation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use checkout_core::{CartError, CartLine, CheckoutSessionRequest, resolve_cart};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Request body of `POST /api/create-checkout-session`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// Cart lines. `null` and a missing field both count as no items.
    #[serde(default)]
    pub items: Option<Vec<CartLine>>,
    /// Customer collects the order in store.
    #[serde(default)]
    pub pickup: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Hosted checkout page to redirect the browser to.
    pub url: String,
}

/// `POST /api/create-checkout-session`
#[instrument(skip_all)]
pub async fn create_session(
    State(state): State<AppState>,
    body: std::result::Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected checkout request body");
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    let lines = request.items.unwrap_or_default();
    if lines.is_empty() {
        return Err(CartError::NoItems.into());
    }

    let catalog = state.catalog().load().await;
    let cart = resolve_cart(&lines, request.pickup, &catalog)?;
    let session_request =
        CheckoutSessionRequest::build(&cart, state.shipping_rates(), state.redirect_urls());

    tracing::info!(
        pickup = request.pickup,
        line_items = cart.line_items.len(),
        subtotal = cart.subtotal,
        weight_grams = cart.total_weight_grams,
        weight_tier = %cart.weight_tier,
        shipping_allowed = cart.shipping_allowed,
        "Creating checkout session"
    );

    let session = state
        .stripe()
        .create_checkout_session(&session_request)
        .await?;

    tracing::info!(session_id = %session.id, "Checkout session created");

    Ok(Json(CheckoutResponse { url: session.url }))
}
