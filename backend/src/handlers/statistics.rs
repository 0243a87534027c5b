//! HTTP handlers for user statistics

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::UserStatistics;
use crate::services::StatisticsService;
use crate::AppState;

/// Progress statistics for the current user
pub async fn get_statistics(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<UserStatistics>> {
    let service = StatisticsService::new(state.db);
    let statistics = service
        .compute_user_statistics(current_user.0.user_id)
        .await?;
    Ok(Json(statistics))
}
