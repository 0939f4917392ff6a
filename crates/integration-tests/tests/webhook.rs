//! End-to-end webhook verification tests.

use checkout_integration_tests::TestContext;
use reqwest::StatusCode;

const COMPLETED: &str = r#"{"id":"evt_1","object":"event","type":"checkout.session.completed","data":{"object":{"id":"cs_test_1","object":"checkout.session","payment_status":"paid"}}}"#;

async fn deliver(
    ctx: &TestContext,
    payload: &str,
    signature: Option<&str>,
) -> (StatusCode, String) {
    let mut request = ctx
        .client
        .post(ctx.url("/webhook"))
        .header("content-type", "application/json")
        .body(payload.to_string());
    if let Some(signature) = signature {
        request = request.header("Stripe-Signature", signature);
    }
    let response = request.send().await.expect("send webhook");
    let status = response.status();
    (status, response.text().await.expect("body"))
}

#[tokio::test]
async fn signed_delivery_is_acknowledged() {
    let ctx = TestContext::start(None).await;

    let (status, body) = deliver(&ctx, COMPLETED, Some(&TestContext::sign(COMPLETED))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Webhook received");
}

#[tokio::test]
async fn other_event_kinds_are_acknowledged() {
    let ctx = TestContext::start(None).await;
    let payload = r#"{"id":"evt_2","type":"customer.created","data":{"object":{"id":"cus_1"}}}"#;

    let (status, _) = deliver(&ctx, payload, Some(&TestContext::sign(payload))).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn modified_body_is_rejected() {
    let ctx = TestContext::start(None).await;
    let signature = TestContext::sign(COMPLETED);
    // Whitespace changes the bytes even though the JSON is equivalent
    let reformatted = COMPLETED.replacen(',', ", ", 1);

    let (status, body) = deliver(&ctx, &reformatted, Some(&signature)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        "Webhook Error: No signatures found matching the expected signature for payload"
    );
}

#[tokio::test]
async fn missing_or_malformed_signature_is_rejected() {
    let ctx = TestContext::start(None).await;

    let (status, body) = deliver(&ctx, COMPLETED, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Webhook Error: Missing Stripe-Signature header");

    let (status, body) = deliver(&ctx, COMPLETED, Some("v1=deadbeef")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("Webhook Error: Malformed Stripe-Signature header"));
}

#[tokio::test]
async fn replayed_delivery_is_rejected() {
    let ctx = TestContext::start(None).await;
    let stale = TestContext::sign_at(COMPLETED, chrono::Utc::now().timestamp() - 3_600);

    let (status, body) = deliver(&ctx, COMPLETED, Some(&stale)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Webhook Error: Timestamp outside the tolerance zone");
}
