//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Liveness check
//! GET  /api/test                     - Backend probe for the frontend
//! GET  /api/products                 - Product catalog
//! POST /api/create-checkout-session  - Create a Stripe Checkout Session
//! POST /webhook                      - Stripe webhook (raw body, signed)
//! GET  /*                            - Static files from the public directory
//! ```

pub mod checkout;
pub mod products;
pub mod webhook;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/test", get(products::probe))
        .route("/products", get(products::index))
        .route("/create-checkout-session", post(checkout::create_session))
}

/// Create all dynamic routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/webhook", post(webhook::receive))
        .nest("/api", api_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog or Stripe.
async fn health() -> &'static str {
    "ok"
}
