//! End-to-end checkout tests against a mocked Stripe API.

#![allow(clippy::unwrap_used)]

use checkout_integration_tests::{STRIPE_SECRET_KEY, TestContext};
use reqwest::StatusCode;
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn catalog() -> Value {
    json!([
        {
            "id": "soap-500g",
            "name": "Olive soap",
            "price": 500,
            "images": ["img/soap.jpg"],
            "stripe_price_id": "price_soap"
        },
        {
            "id": "flour",
            "price": 400,
            "images": ["img/flour.jpg"],
            "stripe_price_id": "price_flour",
            "variants": [
                { "id": "flour-5kg", "price": 1800, "stripe_price_id": "price_flour_5kg" }
            ]
        },
        {
            "id": "cake",
            "price": 3500,
            "pickup_only": true,
            "images": ["img/cake.jpg"],
            "stripe_price_id": "price_cake"
        }
    ])
}

fn session_response(id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": id,
        "object": "checkout.session",
        "url": format!("https://checkout.stripe.com/c/pay/{id}")
    }))
}

async fn create_session(ctx: &TestContext, body: Value) -> (StatusCode, Value) {
    let response = ctx
        .client
        .post(ctx.url("/api/create-checkout-session"))
        .json(&body)
        .send()
        .await
        .expect("send checkout request");
    let status = response.status();
    (status, response.json().await.expect("json body"))
}

#[tokio::test]
async fn probes_and_catalog_are_served() {
    let ctx = TestContext::start(Some(&catalog())).await;

    let health = ctx.client.get(ctx.url("/health")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert!(health.headers().contains_key("x-request-id"));
    assert_eq!(health.text().await.unwrap(), "ok");

    let probe: Value = ctx
        .client
        .get(ctx.url("/api/test"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(probe["success"], true);

    let products: Value = ctx
        .client
        .get(ctx.url("/api/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(products.as_array().map(Vec::len), Some(3));
    assert_eq!(products[0]["name"], "Olive soap");

    let index = ctx.client.get(ctx.url("/")).send().await.unwrap();
    assert_eq!(index.status(), StatusCode::OK);
    assert!(index.text().await.unwrap().contains("<title>Shop</title>"));
}

#[tokio::test]
async fn missing_catalog_serves_empty_list() {
    let ctx = TestContext::start(None).await;

    let response = ctx.client.get(ctx.url("/api/products")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "[]");
}

#[tokio::test]
async fn shipped_order_uses_eu_rate_for_weight_tier() {
    let ctx = TestContext::start(Some(&catalog())).await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(header("authorization", format!("Bearer {STRIPE_SECRET_KEY}").as_str()))
        .and(body_string_contains("mode=payment"))
        .and(body_string_contains("line_items%5B0%5D%5Bprice%5D=price_soap"))
        .and(body_string_contains("line_items%5B1%5D%5Bprice%5D=price_flour_5kg"))
        // 2 x 500g + 5kg = 6kg, subtotal 28.00
        .and(body_string_contains(
            "shipping_options%5B0%5D%5Bshipping_rate%5D=shr_1Sgoi07Vrq9QN3jUWpCe3E015",
        ))
        .and(body_string_contains(
            "shipping_address_collection%5Ballowed_countries%5D%5B0%5D=AT",
        ))
        .and(body_string_contains("success_url=https%3A%2F%2Fshop.example.test%2Fsuccess.html"))
        .respond_with(session_response("cs_test_shipped"))
        .expect(1)
        .mount(&ctx.stripe)
        .await;

    let (status, body) = create_session(
        &ctx,
        json!({
            "items": [{ "id": "soap-500g", "qty": 2 }, { "id": "flour-5kg", "qty": 1 }],
            "pickup": false
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://checkout.stripe.com/c/pay/cs_test_shipped");
}

#[tokio::test]
async fn large_order_ships_free() {
    let ctx = TestContext::start(Some(&catalog())).await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(body_string_contains(
            "shipping_options%5B0%5D%5Bshipping_rate%5D=shr_1Sgmrb7Vrq9QN3jU5XtgW2No",
        ))
        .respond_with(session_response("cs_test_free"))
        .expect(1)
        .mount(&ctx.stripe)
        .await;

    // 4 x 18.00 = 72.00, above the free shipping threshold
    let (status, body) =
        create_session(&ctx, json!({ "items": [{ "id": "flour-5kg", "qty": "4" }] })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://checkout.stripe.com/c/pay/cs_test_free");
}

#[tokio::test]
async fn pickup_order_gets_free_pickup_option() {
    let ctx = TestContext::start(Some(&catalog())).await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(body_string_contains("line_items%5B0%5D%5Bprice%5D=price_cake"))
        .and(body_string_contains(
            "shipping_options%5B0%5D%5Bshipping_rate_data%5D%5Btype%5D=fixed_amount",
        ))
        .and(body_string_contains(
            "shipping_options%5B0%5D%5Bshipping_rate_data%5D%5Bfixed_amount%5D%5Bamount%5D=0",
        ))
        .respond_with(session_response("cs_test_pickup"))
        .expect(1)
        .mount(&ctx.stripe)
        .await;

    let (status, body) = create_session(
        &ctx,
        json!({ "items": [{ "id": "cake", "qty": 1 }], "pickup": true }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://checkout.stripe.com/c/pay/cs_test_pickup");
}

#[tokio::test]
async fn pickup_only_cart_cannot_ship() {
    let ctx = TestContext::start(Some(&catalog())).await;

    Mock::given(method("POST"))
        .respond_with(session_response("cs_never"))
        .expect(0)
        .mount(&ctx.stripe)
        .await;

    let (status, body) = create_session(
        &ctx,
        json!({ "items": [{ "id": "cake", "qty": 1 }], "pickup": false }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "No valid prices found for the items in the cart" })
    );
}

#[tokio::test]
async fn empty_cart_is_rejected() {
    let ctx = TestContext::start(Some(&catalog())).await;

    let (status, body) = create_session(&ctx, json!({ "items": [] })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No items in cart" }));
}

#[tokio::test]
async fn stripe_failure_returns_generic_error() {
    let ctx = TestContext::start(Some(&catalog())).await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&ctx.stripe)
        .await;

    let (status, body) =
        create_session(&ctx, json!({ "items": [{ "id": "soap-500g" }] })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to create checkout session" }));
}
