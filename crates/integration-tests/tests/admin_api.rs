//! Catalog admin API: authentication, write-through and its effect on the
//! public pages.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use serde_json::json;

use ipizza_core::MenuItemId;
use ipizza_integration_tests::{TestApp, body_json, body_string, location};

#[tokio::test]
async fn test_admin_requires_token() {
    let mut app = TestApp::new().await;

    let response = app
        .admin_with_token(Method::GET, "/admin/api/store", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers().get("WWW-Authenticate").unwrap(), "Bearer");

    let response = app
        .admin_with_token(Method::GET, "/admin/api/menu", None, Some("not-the-token"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.admin(Method::GET, "/admin/api/store", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Pizza Delivery");
    assert_eq!(body["status"], "open");
}

#[tokio::test]
async fn test_menu_item_lifecycle() {
    let mut app = TestApp::new().await;

    let response = app
        .admin(
            Method::POST,
            "/admin/api/menu",
            Some(json!({
                "name": "Guaraná 2L",
                "category": "bebidas",
                "pricing": {"single": "12.00"},
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let stored = app.repository().load_menu().await.unwrap().unwrap();
    assert!(stored.iter().any(|item| item.id == MenuItemId::new(id.clone())));

    let html = body_string(app.get("/cardapio?category=bebidas").await).await;
    assert!(html.contains("Guaraná 2L"));

    let response = app
        .admin(
            Method::PUT,
            &format!("/admin/api/menu/{id}"),
            Some(json!({"name": "Guaraná Antarctica 2L"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Guaraná Antarctica 2L");

    let response = app
        .admin(Method::DELETE, &format!("/admin/api/menu/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .admin(Method::GET, &format!("/admin/api/menu/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_menu_item_is_rejected() {
    let mut app = TestApp::new().await;

    let response = app
        .admin(
            Method::POST,
            "/admin/api/menu",
            Some(json!({
                "name": "  ",
                "category": "bebidas",
                "pricing": {"single": "5.00"},
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.repository().load_menu().await.unwrap().is_none());
}

#[tokio::test]
async fn test_promotion_flows_into_cart_and_checkout() {
    let mut app = TestApp::new().await;

    let response = app
        .admin(
            Method::POST,
            "/admin/api/promotions",
            Some(json!({"name": "Dupla", "price": "70.00", "item_ids": ["1", "2"]})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let html = body_string(app.get("/promocoes").await).await;
    assert!(html.contains("Dupla"));
    assert!(html.contains("Mussarela, Calabresa"));
    assert!(html.contains("R$ 85.00"));

    app.post_form("/cart/add-promotion", &format!("promotion_id={id}"))
        .await;
    let html = body_string(app.get("/cart").await).await;
    assert!(html.contains("Promoção: Mussarela, Calabresa"));
    assert!(html.contains("R$ 70.00"));

    let response = app
        .post_form(
            "/checkout",
            "customer_name=Ana&phone=11999990000&fulfillment=pickup&payment=dinheiro",
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).unwrap().contains("Dupla"));
}

#[tokio::test]
async fn test_promotion_with_unknown_item_is_rejected() {
    let mut app = TestApp::new().await;

    let response = app
        .admin(
            Method::POST,
            "/admin/api/promotions",
            Some(json!({"name": "Fantasma", "price": "10.00", "item_ids": ["404"]})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.admin(Method::GET, "/admin/api/promotions", None).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_schedule_edit_updates_status_immediately() {
    let mut app = TestApp::new().await;
    assert_eq!(body_json(app.get("/api/status").await).await["open"], true);

    let response = app
        .admin(
            Method::PUT,
            "/admin/api/store",
            Some(json!({"schedule": {
                "opening_time": "18:00",
                "closing_time": "23:00",
                "operating_days": [0, 5, 6],
            }})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "closed");

    assert_eq!(body_json(app.get("/api/status").await).await["open"], false);

    let stored = app.repository().load_store_profile().await.unwrap().unwrap();
    assert!(stored.schedule.operating_days.unwrap().contains(&5));
}

#[tokio::test]
async fn test_invalid_store_edit_changes_nothing() {
    let mut app = TestApp::new().await;

    let response = app
        .admin(
            Method::PUT,
            "/admin/api/store",
            Some(json!({"name": "Nova", "schedule": {"opening_time": "25:99"}})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .admin(
            Method::PUT,
            "/admin/api/store",
            Some(json!({"maps_link": "not a url"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .admin(
            Method::PUT,
            "/admin/api/store",
            Some(json!({"maps_link": "javascript:alert(document.cookie)"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(app.admin(Method::GET, "/admin/api/store", None).await).await;
    assert_eq!(body["name"], "Pizza Delivery");
    assert!(app.repository().load_store_profile().await.unwrap().is_none());
}
