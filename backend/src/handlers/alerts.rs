//! HTTP handlers for alert endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use super::{ApiResponse, TodayQuery};
use crate::AppState;
use shared::{AlertItem, AlertSummary};

/// Full alert list, soonest first
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Json<ApiResponse<Vec<AlertItem>>> {
    let view = state.dashboard.view(query.resolve());
    let alerts = view.dashboard.alerts.alerts.clone();
    Json(ApiResponse::from_view(&view, alerts))
}

/// Due-soon count and labelled preview for the home card
pub async fn alert_summary(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Json<ApiResponse<AlertSummary>> {
    let view = state.dashboard.view(query.resolve());
    let summary = view.dashboard.alerts.summary();
    Json(ApiResponse::from_view(&view, summary))
}
