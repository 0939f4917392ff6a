//! Stripe REST client.

use checkout_core::{CheckoutSessionRequest, ShippingOption};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, instrument};
use url::Url;

use super::error::StripeError;
use super::types::{CheckoutSession, ErrorResponse};

/// Stripe API client.
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    api_base: Url,
    secret_key: SecretString,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_base", &self.api_base.as_str())
            .field("secret_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl StripeClient {
    /// Create a new Stripe client.
    #[must_use]
    pub fn new(api_base: Url, secret_key: SecretString) -> Self {
        Self {
            client: Client::new(),
            api_base,
            secret_key,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.api_base.as_str().trim_end_matches('/'))
    }

    /// Create a hosted Checkout Session.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, Stripe rejects it, or the
    /// response cannot be parsed. Failures are not retried.
    #[instrument(skip(self, request), fields(line_items = request.line_items.len()))]
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, StripeError> {
        let params = encode_session_params(request);

        let response = self
            .client
            .post(self.endpoint("v1/checkout/sessions"))
            .bearer_auth(self.secret_key.expose_secret())
            .form(&params)
            .send()
            .await
            .map_err(|e| StripeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| match (e.error.message, e.error.kind) {
                    (Some(message), _) => Some(message),
                    (None, kind) => kind,
                })
                .unwrap_or(body);
            error!(status = %status, error = %message, "Stripe API error creating checkout session");
            return Err(StripeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let session: CheckoutSession = response
            .json()
            .await
            .map_err(|e| StripeError::Response(e.to_string()))?;

        debug!(session_id = %session.id, "Checkout session created");

        Ok(session)
    }
}

/// Flatten a session request into Stripe's form parameters.
///
/// Order is stable so the encoded body is deterministic.
#[must_use]
pub fn encode_session_params(request: &CheckoutSessionRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("mode".to_string(), "payment".to_string()),
        ("payment_method_types[0]".to_string(), "card".to_string()),
        (
            "allow_promotion_codes".to_string(),
            request.allow_promotion_codes.to_string(),
        ),
        (
            "success_url".to_string(),
            request.redirect.success_url.clone(),
        ),
        ("cancel_url".to_string(), request.redirect.cancel_url.clone()),
    ];

    for (i, item) in request.line_items.iter().enumerate() {
        params.push((format!("line_items[{i}][price]"), item.price.clone()));
        params.push((format!("line_items[{i}][quantity]"), item.quantity.to_string()));
    }

    if let Some(countries) = &request.allowed_countries {
        for (i, country) in countries.iter().enumerate() {
            params.push((
                format!("shipping_address_collection[allowed_countries][{i}]"),
                country.clone(),
            ));
        }
    }

    for (i, option) in request.shipping_options.iter().enumerate() {
        let prefix = format!("shipping_options[{i}]");
        match option {
            ShippingOption::Rate { rate_id } => {
                params.push((format!("{prefix}[shipping_rate]"), rate_id.clone()));
            }
            ShippingOption::FixedAmount {
                display_name,
                amount,
                currency,
            } => {
                let data = format!("{prefix}[shipping_rate_data]");
                params.push((format!("{data}[type]"), "fixed_amount".to_string()));
                params.push((format!("{data}[fixed_amount][amount]"), amount.to_string()));
                params.push((
                    format!("{data}[fixed_amount][currency]"),
                    currency.as_processor_code().to_string(),
                ));
                params.push((format!("{data}[display_name]"), display_name.clone()));
            }
        }
    }

    params
}
