//! HTTP handlers for the consumption ledger

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::consumption::{Consumption, ConsumptionService, RecordConsumptionInput};
use crate::AppState;

/// Record a consumption event against one of the user's lots
pub async fn record_consumption(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordConsumptionInput>,
) -> AppResult<(StatusCode, Json<Consumption>)> {
    let service = ConsumptionService::new(state.db);
    let record = service
        .record_consumption(current_user.0.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List the user's consumption history, newest first
pub async fn list_consumptions(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Consumption>>> {
    let service = ConsumptionService::new(state.db);
    let records = service.list_by_user(current_user.0.user_id).await?;
    Ok(Json(records))
}
