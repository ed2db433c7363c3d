//! Cart mutations and the WhatsApp checkout, through the session.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use ipizza_integration_tests::{TestApp, body_string, location};

const CUSTOMER: &str =
    "customer_name=Ana&phone=11999990000&fulfillment=delivery&address=Rua+A%2C+10&payment=pix";

#[tokio::test]
async fn test_plain_add_redirects_to_cart() {
    let mut app = TestApp::new().await;

    let response = app.post_form("/cart/add", "item_id=1&size=grande").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/cart"));

    let html = body_string(app.get("/cart").await).await;
    assert!(html.contains("Mussarela"));
    assert!(html.contains("Grande"));
    assert!(html.contains("R$ 40.00"));
}

#[tokio::test]
async fn test_htmx_add_returns_badge_and_trigger() {
    let mut app = TestApp::new().await;

    app.htmx_form("/cart/add", "item_id=1&size=broto").await;
    let response = app.htmx_form("/cart/add", "item_id=1&size=broto").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("HX-Trigger").unwrap(),
        "cart-updated"
    );
    assert_eq!(body_string(response).await.trim(), "(2)");

    let html = body_string(app.get("/cart").await).await;
    assert!(html.contains("R$ 50.00"));
}

#[tokio::test]
async fn test_add_pizza_without_size_is_rejected() {
    let mut app = TestApp::new().await;

    let response = app.post_form("/cart/add", "item_id=1&size=").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_add_unknown_item_is_not_found() {
    let mut app = TestApp::new().await;

    let response = app.post_form("/cart/add", "item_id=999&size=broto").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let mut app = TestApp::new().await;
    app.post_form("/cart/add", "item_id=2&size=grande").await;

    let response = app
        .htmx_form("/cart/update", "product_id=2&size=grande&quantity=0")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Seu carrinho está vazio"));
}

#[tokio::test]
async fn test_sizes_are_separate_lines() {
    let mut app = TestApp::new().await;
    app.post_form("/cart/add", "item_id=1&size=broto").await;
    app.post_form("/cart/add", "item_id=1&size=grande").await;

    let response = app
        .htmx_form("/cart/remove", "product_id=1&size=broto")
        .await;
    let html = body_string(response).await;
    assert!(html.contains("Grande"));
    assert!(!html.contains("Broto"));
    assert!(html.contains("R$ 40.00"));
}

#[tokio::test]
async fn test_checkout_redirects_to_whatsapp_and_clears_cart() {
    let mut app = TestApp::new().await;
    app.post_form("/cart/add", "item_id=1&size=grande").await;
    app.post_form("/cart/add", "item_id=2&size=broto").await;

    let response = app.post_form("/checkout", CUSTOMER).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let link = location(&response).unwrap();
    assert!(link.starts_with("https://wa.me/5511999999999?text="));
    assert!(link.contains("Mussarela"));
    assert!(link.contains("68.00"));

    let count = body_string(app.get("/cart/count").await).await;
    assert_eq!(count.trim(), "");
}

#[tokio::test]
async fn test_htmx_checkout_uses_hx_redirect() {
    let mut app = TestApp::new().await;
    app.post_form("/cart/add", "item_id=3&size=broto").await;

    let response = app.htmx_form("/checkout", CUSTOMER).await;
    assert_eq!(response.status(), StatusCode::OK);
    let target = response.headers().get("HX-Redirect").unwrap().to_str().unwrap();
    assert!(target.starts_with("https://wa.me/5511999999999?text="));
}

#[tokio::test]
async fn test_checkout_without_name_keeps_cart() {
    let mut app = TestApp::new().await;
    app.post_form("/cart/add", "item_id=1&size=grande").await;

    let response = app
        .post_form("/checkout", "customer_name=&phone=11999990000&fulfillment=pickup")
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("Por favor, preencha seu nome e telefone"));
    assert!(html.contains("Mussarela"));

    let count = body_string(app.get("/cart/count").await).await;
    assert_eq!(count.trim(), "(1)");
}

#[tokio::test]
async fn test_delivery_checkout_requires_address() {
    let mut app = TestApp::new().await;
    app.post_form("/cart/add", "item_id=1&size=grande").await;

    let response = app
        .post_form(
            "/checkout",
            "customer_name=Ana&phone=11999990000&fulfillment=delivery&address=+",
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body_string(response)
            .await
            .contains("Por favor, preencha o endereço para entrega")
    );
}

#[tokio::test]
async fn test_checkout_with_empty_cart_goes_back_to_cart() {
    let mut app = TestApp::new().await;

    let response = app.post_form("/checkout", CUSTOMER).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/cart"));
}

#[tokio::test]
async fn test_clear_empties_cart() {
    let mut app = TestApp::new().await;
    app.post_form("/cart/add", "item_id=1&size=grande").await;

    let response = app.post_form("/cart/clear", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let count = body_string(app.get("/cart/count").await).await;
    assert_eq!(count.trim(), "");
}
