//! Stripe webhook signature verification.
//!
//! Stripe signs each delivery with the endpoint secret. The
//! `Stripe-Signature` header carries a timestamp and one or more
//! signatures:
//!
//! ```text
//! Stripe-Signature: t=1700000000,v1=5257a869...,v1=...
//! ```
//!
//! The signed payload is `"{t}." + raw body`, MAC'd with HMAC-SHA256. The
//! body must be verified byte for byte as received, before any JSON parsing.

mod event;

pub use event::{CHECKOUT_SESSION_COMPLETED, EventData, WebhookEvent};

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;
use tracing::{debug, instrument};

type HmacSha256 = Hmac<Sha256>;

/// The HTTP header carrying the signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Webhook verification failures.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Missing Stripe-Signature header")]
    MissingHeader,

    #[error("Malformed Stripe-Signature header: {0}")]
    MalformedHeader(String),

    #[error("Timestamp outside the tolerance zone")]
    TimestampOutsideTolerance,

    #[error("No signatures found matching the expected signature for payload")]
    SignatureMismatch,

    #[error("Invalid event payload: {0}")]
    InvalidPayload(String),
}

/// Verifies webhook deliveries against the endpoint secret.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: SecretString,
    tolerance_secs: u64,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"[REDACTED]")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<Vec<u8>>,
}

impl WebhookVerifier {
    #[must_use]
    pub const fn new(secret: SecretString, tolerance_secs: u64) -> Self {
        Self {
            secret,
            tolerance_secs,
        }
    }

    /// Verify a delivery against the current time and parse its event.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError` if the header is malformed, no signature
    /// matches, the timestamp is outside the tolerance, or the verified body
    /// is not an event.
    pub fn verify(&self, payload: &[u8], header: &str) -> Result<WebhookEvent, WebhookError> {
        self.verify_at(payload, header, chrono::Utc::now().timestamp())
    }

    /// Verify a delivery as of `now` (unix seconds).
    ///
    /// # Errors
    ///
    /// See [`WebhookVerifier::verify`].
    #[instrument(skip(self, payload, header), fields(payload_len = payload.len()))]
    pub fn verify_at(
        &self,
        payload: &[u8],
        header: &str,
        now: i64,
    ) -> Result<WebhookEvent, WebhookError> {
        let parsed = parse_header(header)?;

        let matched = parsed.signatures.iter().any(|signature| {
            self.mac(parsed.timestamp, payload)
                .is_ok_and(|mac| mac.verify_slice(signature).is_ok())
        });
        if !matched {
            return Err(WebhookError::SignatureMismatch);
        }

        if now.abs_diff(parsed.timestamp) > self.tolerance_secs {
            return Err(WebhookError::TimestampOutsideTolerance);
        }

        debug!("Stripe signature verified");

        serde_json::from_slice(payload).map_err(|e| WebhookError::InvalidPayload(e.to_string()))
    }

    fn mac(&self, timestamp: i64, payload: &[u8]) -> Result<HmacSha256, WebhookError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| WebhookError::MalformedHeader(e.to_string()))?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac)
    }
}

fn parse_header(header: &str) -> Result<SignatureHeader, WebhookError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => {
                let ts = value
                    .parse::<i64>()
                    .map_err(|_| WebhookError::MalformedHeader("invalid timestamp".to_string()))?;
                timestamp = Some(ts);
            }
            // Undecodable entries can never match, so they are skipped
            "v1" => {
                if let Ok(bytes) = hex::decode(value) {
                    signatures.push(bytes);
                }
            }
            _ => {}
        }
    }

    let timestamp =
        timestamp.ok_or_else(|| WebhookError::MalformedHeader("missing timestamp".to_string()))?;
    if signatures.is_empty() {
        return Err(WebhookError::MalformedHeader(
            "no v1 signatures".to_string(),
        ));
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

/// Build a `Stripe-Signature` header value for `payload`.
///
/// Used to sign test deliveries locally.
///
/// # Errors
///
/// Returns error if the secret cannot be used as an HMAC key.
pub fn sign_payload(
    secret: &SecretString,
    payload: &[u8],
    timestamp: i64,
) -> Result<String, WebhookError> {
    let verifier = WebhookVerifier::new(secret.clone(), 0);
    let signature = verifier.mac(timestamp, payload)?.finalize().into_bytes();
    Ok(format!("t={timestamp},v1={}", hex::encode(signature)))
}
