//! Route definitions for the Pantry Tracker API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - item ledger
        .nest("/items", item_routes(state.clone()))
        // Protected routes - consumption ledger
        .nest("/consumptions", consumption_routes(state.clone()))
        // Protected routes - inventories
        .nest("/inventories", inventory_routes(state.clone()))
        // Protected routes - classified stock views
        .nest("/summary", summary_routes(state.clone()))
        // Protected routes - progress statistics
        .nest("/statistics", statistics_routes(state.clone()))
        // Protected routes - recipe recommendations
        .nest("/recipes", recipe_routes(state))
}

/// Item ledger routes (protected)
fn item_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_items).post(handlers::add_item))
        .route("/expiring", get(handlers::list_expiring_items))
        .route(
            "/:item_id",
            axum::routing::put(handlers::update_item).delete(handlers::delete_item),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Consumption ledger routes (protected)
fn consumption_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_consumptions).post(handlers::record_consumption),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Inventory routes (protected)
fn inventory_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_inventories).post(handlers::create_inventory),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Classified stock view routes (protected)
fn summary_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_summary))
        .route("/:category", get(handlers::list_by_category))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Statistics routes (protected)
fn statistics_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_statistics))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Recipe recommendation routes (protected)
fn recipe_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/recommendations", post(handlers::recommend_recipes))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
