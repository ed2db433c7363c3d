//! Store profile admin handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use ipizza_core::{StoreProfile, StoreProfileUpdate, StoreStatus};

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// The profile plus the status it currently yields.
#[derive(Debug, Serialize)]
pub struct StoreResponse {
    #[serde(flatten)]
    pub profile: StoreProfile,
    pub status: StoreStatus,
}

/// Current store profile.
#[instrument(skip_all)]
pub async fn show(_admin: RequireAdmin, State(state): State<AppState>) -> Json<StoreResponse> {
    Json(StoreResponse {
        profile: state.catalog().store_profile().await,
        status: state.status().current(),
    })
}

/// Patch the store profile.
///
/// Absent fields are left alone. The open/closed status is re-evaluated
/// immediately so a schedule edit shows up on the next page load.
///
/// # Errors
///
/// Returns 422 for invalid fields and 500 when storage fails.
#[instrument(skip_all)]
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(update): Json<StoreProfileUpdate>,
) -> Result<Json<StoreResponse>> {
    let profile = state.catalog().update_store_profile(update).await?;
    let status = state.status().refresh().await;

    Ok(Json(StoreResponse { profile, status }))
}
