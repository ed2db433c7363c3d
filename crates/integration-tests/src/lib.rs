//! Test harness for the IPIZZA storefront.
//!
//! [`TestApp`] builds the full router around an in-memory catalog and a
//! fixed clock, then drives it request by request without binding a socket.
//! It behaves like a browser with cookies enabled: the session cookie from
//! the first response is sent with every later request.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ipizza-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Method, Request, StatusCode, header},
    response::Response,
};
use chrono::{NaiveDate, NaiveDateTime};
use secrecy::SecretString;
use tower::ServiceExt;

use ipizza_core::Catalog;
use ipizza_storefront::config::StorefrontConfig;
use ipizza_storefront::db::{CatalogRepository, InMemoryRepository};
use ipizza_storefront::services::{CatalogService, FixedClock, StatusMonitor};
use ipizza_storefront::state::AppState;

/// Admin bearer token every [`TestApp`] is configured with.
pub const ADMIN_TOKEN: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%";

/// Tuesday 2024-06-04 19:00, inside the default schedule.
#[must_use]
pub fn tuesday_evening() -> NaiveDateTime {
    at(2024, 6, 4, 19, 0)
}

/// Monday 2024-06-03 19:00, a day the default schedule is closed.
#[must_use]
pub fn monday_evening() -> NaiveDateTime {
    at(2024, 6, 3, 19, 0)
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        data_dir: PathBuf::from("data"),
        admin_token: SecretString::from(ADMIN_TOKEN),
        schedule_refresh: Duration::from_secs(60),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// The storefront router plus the repository behind it.
pub struct TestApp {
    router: Router,
    repository: Arc<InMemoryRepository>,
    cookie: Option<HeaderValue>,
}

impl TestApp {
    /// Default catalog, clock fixed at [`tuesday_evening`].
    pub async fn new() -> Self {
        Self::build(InMemoryRepository::new(), tuesday_evening()).await
    }

    /// Default catalog, clock fixed at `now`.
    pub async fn at(now: NaiveDateTime) -> Self {
        Self::build(InMemoryRepository::new(), now).await
    }

    /// Start from `catalog` as if it had been stored before startup.
    pub async fn with_catalog(catalog: Catalog) -> Self {
        Self::build(InMemoryRepository::with_catalog(catalog), tuesday_evening()).await
    }

    async fn build(repository: InMemoryRepository, now: NaiveDateTime) -> Self {
        let repository = Arc::new(repository);
        let catalog = CatalogService::load(repository.clone())
            .await
            .unwrap_or_else(|e| panic!("catalog failed to load: {e}"));
        let status = StatusMonitor::start(
            catalog.clone(),
            Arc::new(FixedClock(now)),
            Duration::from_secs(60),
        )
        .await;
        let state = AppState::new(test_config(), catalog, status);

        Self {
            router: ipizza_storefront::app(state),
            repository,
            cookie: None,
        }
    }

    /// The repository the catalog writes through to.
    #[must_use]
    pub fn repository(&self) -> &dyn CatalogRepository {
        self.repository.as_ref()
    }

    /// Send a request, carrying the session cookie both ways.
    pub async fn send(&mut self, mut request: Request<Body>) -> Response {
        if let Some(cookie) = &self.cookie {
            request.headers_mut().insert(header::COOKIE, cookie.clone());
        }

        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .and_then(|pair| HeaderValue::from_str(pair).ok())
        {
            self.cookie = Some(cookie);
        }

        response
    }

    pub async fn get(&mut self, uri: &str) -> Response {
        self.send(request(Method::GET, uri).body(Body::empty()).unwrap_or_default())
            .await
    }

    /// POST an urlencoded form, as a plain browser submission.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> Response {
        self.send(form_request(uri, form, false)).await
    }

    /// POST an urlencoded form the way htmx does.
    pub async fn htmx_form(&mut self, uri: &str, form: &str) -> Response {
        self.send(form_request(uri, form, true)).await
    }

    /// Call the admin API with the configured token.
    pub async fn admin(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Response {
        self.admin_with_token(method, uri, body, Some(ADMIN_TOKEN))
            .await
    }

    /// Log in to the back-office pages with the configured token.
    pub async fn login(&mut self) -> Response {
        let form = format!("token={}", urlencoding::encode(ADMIN_TOKEN));
        self.post_form("/admin/login", &form).await
    }

    pub async fn admin_with_token(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = request(method, uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        };
        self.send(request.unwrap_or_default()).await
    }
}

fn request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(uri)
}

fn form_request(uri: &str, form: &str, htmx: bool) -> Request<Body> {
    let mut builder = request(Method::POST, uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if htmx {
        builder = builder.header("HX-Request", "true");
    }
    builder.body(Body::from(form.to_string())).unwrap_or_default()
}

/// Read a response body as UTF-8.
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Read a response body as JSON; `Null` when it is not JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap_or_default()
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// Assert helper for the common status check.
pub fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status");
}
