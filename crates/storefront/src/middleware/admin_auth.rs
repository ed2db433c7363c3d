//! Back-office authentication.
//!
//! Both admin surfaces share one secret, `STOREFRONT_ADMIN_TOKEN`. The JSON
//! API takes it as a bearer token; the HTML pages take it once on
//! `/admin/login` and remember the login in the session. There are no admin
//! accounts.

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::is_admin;
use crate::state::AppState;

/// Login page of the back office.
pub const LOGIN_PATH: &str = "/admin/login";

/// Extractor that requires a valid bearer token or a logged-in session.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_admin: RequireAdmin) -> impl IntoResponse {
///     "hello, admin"
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

/// Rejection for a request that is not authenticated as admin.
#[derive(Debug)]
pub enum AdminRejection {
    /// Browser pages go to the login form.
    RedirectToLogin,
    /// API requests get a bare 401.
    Unauthorized,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [("WWW-Authenticate", "Bearer")],
                "Unauthorized",
            )
                .into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        if let Some(token) = bearer {
            if state.config().admin_token_matches(token.trim()) {
                return Ok(Self);
            }
            tracing::warn!(path = %parts.uri.path(), "rejected admin request with wrong token");
            return Err(AdminRejection::Unauthorized);
        }

        if let Some(session) = parts.extensions.get::<Session>()
            && is_admin(session).await
        {
            return Ok(Self);
        }

        // Nested routers see a stripped URI; the original one tells API from pages.
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map_or_else(|| parts.uri.path(), |uri| uri.path());
        if path.starts_with("/admin/api") {
            Err(AdminRejection::Unauthorized)
        } else {
            Err(AdminRejection::RedirectToLogin)
        }
    }
}
