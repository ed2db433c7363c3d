//! Store status API.

use axum::{Json, extract::State};
use serde::Serialize;

use ipizza_core::StoreStatus;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub open: bool,
    pub status: StoreStatus,
}

/// Current open/closed status, as last published by the monitor.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let status = state.status().current();
    Json(StatusResponse {
        open: status.is_open(),
        status,
    })
}
