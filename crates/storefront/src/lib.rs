//! Checkout storefront library.
//!
//! Serves the product catalog and static shop pages, creates Stripe Checkout
//! Sessions from browser carts and verifies Stripe webhooks. Exposed as a
//! library so the router can be tested and embedded.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod stripe;
pub mod webhook;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Build the complete application router.
///
/// Unmatched paths fall through to static files from the public directory.
pub fn app(state: AppState) -> Router {
    let public_dir = ServeDir::new(&state.config().public_dir);

    routes::routes()
        .fallback_service(public_dir)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(middleware::trace_layer())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
        .layer(sentry_tower::NewSentryLayer::new_from_top())
}
