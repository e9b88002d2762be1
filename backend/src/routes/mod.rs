//! Route definitions for the Herd Manager API

use axum::{
    routing::{get, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/alerts", alert_routes())
        .nest("/stats", stats_routes())
        .route("/calvings/upcoming", get(handlers::get_upcoming_calvings))
        .route(
            "/farm",
            get(handlers::get_farm).put(handlers::update_farm),
        )
        // Entry point for the sync layer
        .route("/collections/:name", put(handlers::replace_collection))
}

/// Alert routes
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_alerts))
        .route("/summary", get(handlers::alert_summary))
}

/// Statistics routes
fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_stats))
        .route("/monthly", get(handlers::get_monthly_stats))
}
