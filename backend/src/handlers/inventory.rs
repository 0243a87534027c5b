//! HTTP handlers for inventory management

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::inventory::{CreateInventoryInput, Inventory, InventoryService};
use crate::AppState;

/// Create an inventory for the current user
pub async fn create_inventory(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateInventoryInput>,
) -> AppResult<(StatusCode, Json<Inventory>)> {
    let service = InventoryService::new(state.db);
    let inventory = service.create(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(inventory)))
}

/// List the current user's inventories
pub async fn list_inventories(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Inventory>>> {
    let service = InventoryService::new(state.db);
    let inventories = service.list_by_user(current_user.0.user_id).await?;
    Ok(Json(inventories))
}
