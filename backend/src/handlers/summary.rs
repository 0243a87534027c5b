//! HTTP handlers for classified stock views

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::{Paginated, Pagination, StockCategory, StockSummary};
use crate::services::summary::{CategorizedItem, SummaryService};
use crate::AppState;

/// Per-category quantity totals for the current user
pub async fn get_summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<StockSummary>> {
    let service = SummaryService::new(state.db);
    let summary = service.summary(current_user.0.user_id).await?;
    Ok(Json(summary))
}

/// Page through the lots contributing to one category
pub async fn list_by_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category): Path<String>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<Paginated<CategorizedItem>>> {
    let category = StockCategory::from_str(&category)
        .ok_or_else(|| AppError::validation("category", "Unknown stock category"))?;

    let service = SummaryService::new(state.db);
    let page = service
        .list_by_category(current_user.0.user_id, category, pagination)
        .await?;
    Ok(Json(page))
}
