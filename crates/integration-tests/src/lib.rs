//! Integration tests for the checkout storefront.
//!
//! Each test gets its own server on an ephemeral port, a temporary public
//! directory holding the catalog, and a `wiremock` server standing in for the
//! Stripe API. Nothing outside the test process is contacted.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p checkout-integration-tests
//! ```

use std::net::SocketAddr;

use checkout_storefront::config::{StorefrontConfig, StripeConfig};
use checkout_storefront::state::AppState;
use reqwest::Client;
use secrecy::SecretString;
use serde_json::Value;
use tempfile::TempDir;
use url::Url;
use wiremock::MockServer;

/// Webhook signing secret the test servers are configured with.
pub const WEBHOOK_SECRET: &str = "whsec_T3stS1gn1ngK3yQz";

/// Stripe key the test servers send to the mock API.
pub const STRIPE_SECRET_KEY: &str = "sk_test_51HxQa2Lk9VbN3mPq";

/// Frontend URL used for redirect pages.
pub const FRONTEND_URL: &str = "https://shop.example.test";

/// A running storefront with its mocked Stripe API.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub stripe: MockServer,
    pub public_dir: TempDir,
}

impl TestContext {
    /// Start a storefront serving `catalog` as `products.json`.
    ///
    /// Pass `None` to start without a catalog file.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory, catalog file or listener cannot be
    /// created.
    #[allow(clippy::expect_used)]
    pub async fn start(catalog: Option<&Value>) -> Self {
        let stripe = MockServer::start().await;
        let public_dir = tempfile::tempdir().expect("create public dir");

        if let Some(catalog) = catalog {
            std::fs::write(
                public_dir.path().join("products.json"),
                serde_json::to_vec(catalog).expect("serialize catalog"),
            )
            .expect("write catalog");
        }
        std::fs::write(
            public_dir.path().join("index.html"),
            "<!doctype html><title>Shop</title>",
        )
        .expect("write index.html");

        let config = StorefrontConfig {
            host: "127.0.0.1".parse().expect("loopback address"),
            port: 0,
            frontend_url: FRONTEND_URL.to_string(),
            public_dir: public_dir.path().to_path_buf(),
            catalog_path: public_dir.path().join("products.json"),
            stripe: StripeConfig {
                secret_key: SecretString::from(STRIPE_SECRET_KEY),
                webhook_secret: SecretString::from(WEBHOOK_SECRET),
                api_base: Url::parse(&stripe.uri()).expect("mock server url"),
                webhook_tolerance_secs: 300,
            },
            sentry_dsn: None,
            sentry_environment: None,
        };

        let listener = tokio::net::TcpListener::bind(config.socket_addr())
            .await
            .expect("bind ephemeral port");
        let addr: SocketAddr = listener.local_addr().expect("local addr");
        let app = checkout_storefront::app(AppState::new(config));

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            stripe,
            public_dir,
        }
    }

    /// Absolute URL for a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sign `payload` with the test webhook secret at the current time.
    ///
    /// # Panics
    ///
    /// Panics if signing fails.
    #[must_use]
    pub fn sign(payload: &str) -> String {
        Self::sign_at(payload, chrono::Utc::now().timestamp())
    }

    /// Sign `payload` with the test webhook secret at `timestamp`.
    ///
    /// # Panics
    ///
    /// Panics if signing fails.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn sign_at(payload: &str, timestamp: i64) -> String {
        checkout_storefront::webhook::sign_payload(
            &SecretString::from(WEBHOOK_SECRET),
            payload.as_bytes(),
            timestamp,
        )
        .expect("sign payload")
    }
}
