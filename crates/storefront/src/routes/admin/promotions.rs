//! Promotion admin handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use ipizza_core::{NewPromotion, Promotion, PromotionId, PromotionUpdate};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

#[instrument(skip_all)]
pub async fn index(_admin: RequireAdmin, State(state): State<AppState>) -> Json<Vec<Promotion>> {
    Json(state.catalog().promotions().await)
}

/// Create a promotion with a fresh id.
///
/// # Errors
///
/// Returns 422 when the bundle is invalid or names an item that is not on
/// the menu, and 500 when storage fails.
#[instrument(skip_all)]
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(new): Json<NewPromotion>,
) -> Result<(StatusCode, Json<Promotion>)> {
    let promotion = state.catalog().add_promotion(new).await?;
    Ok((StatusCode::CREATED, Json(promotion)))
}

/// # Errors
///
/// Returns 404 for an unknown id.
#[instrument(skip(state))]
pub async fn show(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Promotion>> {
    let id = PromotionId::new(id);
    state
        .catalog()
        .promotion(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("promotion {id}")))
}

/// # Errors
///
/// Returns 404 for an unknown id, 422 for invalid fields.
#[instrument(skip(state, update))]
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<PromotionUpdate>,
) -> Result<Json<Promotion>> {
    let promotion = state
        .catalog()
        .update_promotion(&PromotionId::new(id), update)
        .await?;
    Ok(Json(promotion))
}

/// # Errors
///
/// Returns 404 for an unknown id.
#[instrument(skip(state))]
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state
        .catalog()
        .remove_promotion(&PromotionId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
