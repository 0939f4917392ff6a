//! Webhook test signatures.

use std::path::Path;

use secrecy::SecretString;

/// Print a `Stripe-Signature` header for the payload file.
///
/// The payload is signed byte for byte, so send the file unchanged (for
/// example with `curl --data-binary @event.json`).
///
/// # Errors
///
/// Returns an error if the payload file cannot be read.
pub async fn sign(
    secret: String,
    payload: &Path,
    timestamp: Option<i64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = tokio::fs::read(payload).await?;
    let timestamp = timestamp.unwrap_or_else(|| chrono::Utc::now().timestamp());

    let header = checkout_storefront::webhook::sign_payload(
        &SecretString::from(secret),
        &body,
        timestamp,
    )?;

    tracing::debug!(bytes = body.len(), timestamp, "Signed webhook payload");
    println!("Stripe-Signature: {header}");

    Ok(())
}
