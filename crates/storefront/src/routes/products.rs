//! Catalog routes.

use axum::{Json, extract::State};
use checkout_core::Product;
use serde::Serialize;

use crate::state::AppState;

/// `GET /api/products` - the full catalog, or `[]` if it cannot be loaded.
pub async fn index(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().load().await)
}

/// Body of the `GET /api/test` probe.
#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub success: bool,
    pub message: &'static str,
}

/// `GET /api/test` - backend liveness probe used by the frontend.
pub async fn probe() -> Json<ProbeResponse> {
    Json(ProbeResponse {
        success: true,
        message: "Backend is running",
    })
}
