//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::DataSource;
use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub data_source: DataSource,
    pub generation: u64,
    /// Generation the cached dashboard was computed from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_generation: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let current = state.store.current();
    let status = if current.load_error.is_some() {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        data_source: current.source,
        generation: current.generation,
        dashboard_generation: state.dashboard.cached_generation(),
        load_error: current.load_error,
    })
}
