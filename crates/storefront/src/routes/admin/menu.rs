//! Menu admin handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use ipizza_core::{MenuItem, MenuItemId, MenuItemUpdate, NewMenuItem};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// List every menu item in menu order.
#[instrument(skip_all)]
pub async fn index(_admin: RequireAdmin, State(state): State<AppState>) -> Json<Vec<MenuItem>> {
    Json(state.catalog().menu().await)
}

/// Create a menu item with a fresh id.
///
/// # Errors
///
/// Returns 422 when the item is invalid and 500 when storage fails.
#[instrument(skip_all)]
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(new): Json<NewMenuItem>,
) -> Result<(StatusCode, Json<MenuItem>)> {
    let item = state.catalog().add_menu_item(new).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// # Errors
///
/// Returns 404 for an unknown id.
#[instrument(skip(state))]
pub async fn show(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MenuItem>> {
    let id = MenuItemId::new(id);
    state
        .catalog()
        .menu_item(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))
}

/// Patch a menu item.
///
/// # Errors
///
/// Returns 404 for an unknown id, 422 for invalid fields.
#[instrument(skip(state, update))]
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<MenuItemUpdate>,
) -> Result<Json<MenuItem>> {
    let item = state
        .catalog()
        .update_menu_item(&MenuItemId::new(id), update)
        .await?;
    Ok(Json(item))
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
        .remove_menu_item(&MenuItemId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
