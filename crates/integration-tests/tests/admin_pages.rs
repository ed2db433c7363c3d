//! Back-office HTML pages: session login, dashboard and the store form.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};

use ipizza_integration_tests::{TestApp, body_json, body_string, location};

#[tokio::test]
async fn test_dashboard_redirects_to_login() {
    let mut app = TestApp::new().await;

    let response = app.get("/admin").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/admin/login"));

    let html = body_string(app.get("/admin/login").await).await;
    assert!(html.contains(r#"name="token""#));
}

#[tokio::test]
async fn test_wrong_token_is_rejected() {
    let mut app = TestApp::new().await;

    let response = app.post_form("/admin/login", "token=nope").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_string(response).await.contains("Token inválido"));

    let response = app.get("/admin").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_shows_dashboard_until_logout() {
    let mut app = TestApp::new().await;

    let response = app.login().await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/admin"));

    let response = app.get("/admin").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Pizza Delivery"));
    assert!(html.contains("Mussarela"));
    assert!(html.contains(r#"value="0,2,3,4,5,6""#));

    // The session also opens the JSON API, without a bearer token.
    let response = app
        .admin_with_token(Method::GET, "/admin/api/store", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.post_form("/admin/logout", "").await;
    assert_eq!(location(&response), Some("/admin/login"));
    let response = app.get("/admin").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_store_form_saves_and_recomputes_status() {
    let mut app = TestApp::new().await;
    app.login().await;

    let form = "name=IPIZZA&contact_number=5511988887777&social_handle=%40ipizza\
        &maps_link=https%3A%2F%2Fmaps.google.com&delivery_time=30+minutos\
        &opening_time=18%3A00&closing_time=23%3A00&operating_days=0%2C5%2C6";
    let response = app.post_form("/admin/store", form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/admin"));

    let stored = app.repository().load_store_profile().await.unwrap().unwrap();
    assert_eq!(stored.name, "IPIZZA");
    assert_eq!(stored.delivery_time, "30 minutos");
    assert_eq!(body_json(app.get("/api/status").await).await["open"], false);
}

#[tokio::test]
async fn test_invalid_store_form_is_shown_again() {
    let mut app = TestApp::new().await;
    app.login().await;

    let form = "name=IPIZZA&maps_link=javascript%3Aalert(1)&opening_time=18%3A00\
        &closing_time=23%3A00&operating_days=2";
    let response = app.post_form("/admin/store", form).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("invalid maps link"));
    assert!(html.contains(r#"value="IPIZZA""#));

    let response = app
        .post_form("/admin/store", "name=IPIZZA&operating_days=ter%C3%A7a")
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(app.repository().load_store_profile().await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_form_requires_login() {
    let mut app = TestApp::new().await;

    let response = app.post_form("/admin/store", "name=Invasor").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/admin/login"));
    assert!(app.repository().load_store_profile().await.unwrap().is_none());
}
