//! Stripe event envelope.

use serde::Deserialize;
use serde_json::Value;

/// Event type emitted when a customer completes a Checkout Session.
pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

/// A verified webhook event.
///
/// Missing fields default, so sparse signed events are acknowledged; only
/// completed sessions need `data.object.id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEvent {
    /// Event ID (`evt_...`).
    #[serde(default)]
    pub id: String,
    /// Event type, e.g. `checkout.session.completed`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub data: EventData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventData {
    /// The API resource the event is about.
    #[serde(default)]
    pub object: Value,
}

impl WebhookEvent {
    /// Session ID of a `checkout.session.completed` event.
    #[must_use]
    pub fn completed_session_id(&self) -> Option<&str> {
        if self.kind != CHECKOUT_SESSION_COMPLETED {
            return None;
        }
        self.data.object.get("id").and_then(Value::as_str)
    }
}
