//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures processor failures to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use checkout_core::CartError;
use serde_json::json;
use thiserror::Error;

use crate::stripe::StripeError;
use crate::webhook::WebhookError;

/// Message returned for any payment processor failure.
pub const PAYMENT_FAILED_MESSAGE: &str = "Failed to create checkout session";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body failed validation.
    #[error("{0}")]
    BadRequest(String),

    /// Cart could not be turned into line items.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Payment processor call failed.
    #[error("Payment processor error: {0}")]
    Payment(#[from] StripeError),

    /// Webhook delivery failed verification.
    #[error("Webhook Error: {0}")]
    Webhook(#[from] WebhookError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Self::Cart(err) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response(),
            Self::Payment(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Request error"
                );
                // Don't expose processor details to clients
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": PAYMENT_FAILED_MESSAGE })),
                )
                    .into_response()
            }
            Self::Webhook(ref err) => {
                tracing::warn!(error = %err, "Webhook verification failed");
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("invalid request body".to_string());
        assert_eq!(err.to_string(), "invalid request body");

        let err = AppError::Cart(CartError::NoItems);
        assert_eq!(err.to_string(), "No items in cart");

        let err = AppError::Webhook(WebhookError::SignatureMismatch);
        assert_eq!(
            err.to_string(),
            "Webhook Error: No signatures found matching the expected signature for payload"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::NoResolvablePrices)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Payment(StripeError::Request("timeout".to_string()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Webhook(WebhookError::MissingHeader)),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_payment_error_hides_details() {
        let err = AppError::Payment(StripeError::Api {
            status: 401,
            message: "Invalid API Key provided: sk_test_****".to_string(),
        });
        let body = body_text(err.into_response()).await;

        assert_eq!(body, r#"{"error":"Failed to create checkout session"}"#);
    }

    #[tokio::test]
    async fn test_cart_error_body() {
        let body = body_text(AppError::Cart(CartError::NoItems).into_response()).await;
        assert_eq!(body, r#"{"error":"No items in cart"}"#);
    }

    #[tokio::test]
    async fn test_webhook_error_is_plain_text() {
        let response = AppError::Webhook(WebhookError::TimestampOutsideTolerance).into_response();
        assert_eq!(
            body_text(response).await,
            "Webhook Error: Timestamp outside the tolerance zone"
        );
    }
}
