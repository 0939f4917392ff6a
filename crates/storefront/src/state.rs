//! Application state shared across handlers.

use std::sync::Arc;

use checkout_core::{RedirectUrls, ShippingRates};

use crate::catalog::CatalogLoader;
use crate::config::StorefrontConfig;
use crate::stripe::StripeClient;
use crate::webhook::WebhookVerifier;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Everything in here is fixed at startup;
/// handlers never mutate it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogLoader,
    stripe: StripeClient,
    webhooks: WebhookVerifier,
    shipping_rates: ShippingRates,
    redirect_urls: RedirectUrls,
}

impl AppState {
    /// Create a new application state with the default shipping rate table.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_shipping_rates(config, ShippingRates::default())
    }

    /// Create a new application state with a custom shipping rate table.
    #[must_use]
    pub fn with_shipping_rates(config: StorefrontConfig, shipping_rates: ShippingRates) -> Self {
        let catalog = CatalogLoader::new(config.catalog_path.clone());
        let stripe = StripeClient::new(
            config.stripe.api_base.clone(),
            config.stripe.secret_key.clone(),
        );
        let webhooks = WebhookVerifier::new(
            config.stripe.webhook_secret.clone(),
            config.stripe.webhook_tolerance_secs,
        );
        let redirect_urls = config.redirect_urls();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                stripe,
                webhooks,
                shipping_rates,
                redirect_urls,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog loader.
    #[must_use]
    pub fn catalog(&self) -> &CatalogLoader {
        &self.inner.catalog
    }

    /// Get a reference to the Stripe API client.
    #[must_use]
    pub fn stripe(&self) -> &StripeClient {
        &self.inner.stripe
    }

    #[must_use]
    pub fn webhooks(&self) -> &WebhookVerifier {
        &self.inner.webhooks
    }

    #[must_use]
    pub fn shipping_rates(&self) -> &ShippingRates {
        &self.inner.shipping_rates
    }

    #[must_use]
    pub fn redirect_urls(&self) -> &RedirectUrls {
        &self.inner.redirect_urls
    }
}
