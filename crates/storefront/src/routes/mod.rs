//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (profile, open/closed badge, hours)
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (catalog storage readable)
//!
//! # Catalog
//! GET  /cardapio?category=&q=  - Menu page, one category at a time
//! GET  /promocoes              - Promotions page
//!
//! # Cart (HTMX fragments, or 303 back to /cart for plain posts)
//! GET  /cart                   - Cart page with checkout form
//! POST /cart/add               - Add a menu item (returns count badge)
//! POST /cart/add-promotion     - Add a promotion bundle (returns count badge)
//! POST /cart/update            - Set a line's quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove a line (returns cart_items fragment)
//! POST /cart/clear             - Empty the cart (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout               - Validate, then redirect to WhatsApp
//!
//! # API
//! GET  /api/status             - {"open": bool, "status": "open"|"closed"}
//!
//! # Back office pages (session login with the admin token)
//! GET       /admin             - Dashboard: status, store form, menu, promotions
//! GET|POST  /admin/login       - Token login form
//! POST      /admin/logout      - Forget the login
//! POST      /admin/store       - Save the store form
//!
//! # Admin API (Authorization: Bearer <token>, or a logged-in session)
//! GET|PUT         /admin/api/store
//! GET|POST        /admin/api/menu
//! GET|PUT|DELETE  /admin/api/menu/{id}
//! GET|POST        /admin/api/promotions
//! GET|PUT|DELETE  /admin/api/promotions/{id}
//! ```

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod health;
pub mod home;
pub mod menu;
pub mod promotions;
pub mod status;

use std::fmt::Display;
use std::str::FromStr;

use axum::{
    Router,
    http::HeaderMap,
    routing::{get, post},
};
use serde::{Deserialize, Deserializer};

use ipizza_core::StoreStatus;

use crate::state::AppState;

/// Event name sent in `HX-Trigger` after any cart mutation.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Data every full page needs for the shared header.
#[derive(Clone)]
pub struct Layout {
    pub store_name: String,
    pub status: StoreStatus,
}

impl Layout {
    pub async fn load(state: &AppState) -> Self {
        Self {
            store_name: state.catalog().store_profile().await.name,
            status: state.status().current(),
        }
    }
}

/// Whether the request was made by htmx.
#[must_use]
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Form helper: treat a missing or empty field as `None`.
///
/// HTML forms submit `size=` for "no size", which plain `Option<Size>`
/// would reject.
///
/// # Errors
///
/// Returns a deserialization error when a non-empty value does not parse.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/add-promotion", post(cart::add_promotion))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/cardapio", get(menu::index))
        .route("/promocoes", get(promotions::index))
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::checkout))
        .route("/api/status", get(status::status))
        .merge(admin::page_routes())
        .nest("/admin/api", admin::routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;
    use ipizza_core::Size;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct SizeForm {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        size: Option<Size>,
    }

    #[test]
    fn test_empty_size_field_is_none() {
        let form: SizeForm = serde_json::from_str(r#"{"size": ""}"#).unwrap();
        assert_eq!(form.size, None);

        let form: SizeForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.size, None);

        let form: SizeForm = serde_json::from_str(r#"{"size": "broto"}"#).unwrap();
        assert_eq!(form.size, Some(Size::Broto));

        assert!(serde_json::from_str::<SizeForm>(r#"{"size": "media"}"#).is_err());
    }

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));

        headers.insert("HX-Request", HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));
    }
}
