//! HTTP handlers for item ledger endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::item::{AddItemInput, Item, ItemService, UpdateItemInput};
use crate::AppState;

/// Add stock: merges onto an existing lot when the merge key matches,
/// creates a new lot otherwise
pub async fn add_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<AddItemInput>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let service = ItemService::new(state.db);
    let item = service.add_or_merge(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// List all lots across the user's inventories
pub async fn list_items(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Item>>> {
    let service = ItemService::new(state.db);
    let items = service.list_by_owner(current_user.0.user_id).await?;
    Ok(Json(items))
}

/// Lots closest to expiring that have not expired yet
pub async fn list_expiring_items(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Item>>> {
    let service = ItemService::new(state.db);
    let items = service.expiring_soon(current_user.0.user_id).await?;
    Ok(Json(items))
}

/// Update a lot in place
pub async fn update_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(item_id): Path<Uuid>,
    Json(input): Json<UpdateItemInput>,
) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.db);
    let item = service
        .update_lot(item_id, current_user.0.user_id, input)
        .await?;
    Ok(Json(item))
}

/// Delete a lot with no consumption history
pub async fn delete_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.db);
    let item = service.delete_lot(item_id, current_user.0.user_id).await?;
    Ok(Json(item))
}
