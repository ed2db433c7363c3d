//! Store owner's back office.
//!
//! JSON endpoints under `/admin/api` plus a few HTML pages under `/admin`.
//! Every protected handler takes
//! [`RequireAdmin`](crate::middleware::RequireAdmin), so an unauthenticated
//! request never reaches the catalog. Edits are written through to storage
//! before the response is sent.

pub mod menu;
pub mod pages;
pub mod promotions;
pub mod store;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::admin_auth::LOGIN_PATH;
use crate::state::AppState;

/// Build the back-office pages router, mounted at the root.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route(pages::DASHBOARD_PATH, get(pages::dashboard))
        .route(LOGIN_PATH, get(pages::login_page).post(pages::login))
        .route("/admin/logout", post(pages::logout))
        .route("/admin/store", post(pages::update_store))
}

/// Build the admin API router, mounted under `/admin/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/store", get(store::show).put(store::update))
        .route("/menu", get(menu::index).post(menu::create))
        .route(
            "/menu/{id}",
            get(menu::show).put(menu::update).delete(menu::delete),
        )
        .route(
            "/promotions",
            get(promotions::index).post(promotions::create),
        )
        .route(
            "/promotions/{id}",
            get(promotions::show)
                .put(promotions::update)
                .delete(promotions::delete),
        )
}
