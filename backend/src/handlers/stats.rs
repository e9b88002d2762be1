//! HTTP handlers for herd statistics and the calving schedule

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Datelike;
use serde::Deserialize;

use super::{ApiResponse, TodayQuery};
use crate::AppState;
use shared::{events_by_month, upcoming_calvings, CalvingScheduleEntry, EventsByMonth, HerdStats};

#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    pub year: Option<i32>,
}

/// Herd statistics for the dashboard
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Json<ApiResponse<HerdStats>> {
    let view = state.dashboard.view(query.resolve());
    let stats = view.dashboard.stats.clone();
    Json(ApiResponse::from_view(&view, stats))
}

/// Calvings and services per month for analytics charts
pub async fn get_monthly_stats(
    State(state): State<AppState>,
    Query(query): Query<MonthlyQuery>,
) -> Json<ApiResponse<EventsByMonth>> {
    let current = state.store.current();
    let year = query
        .year
        .unwrap_or_else(|| TodayQuery::default().resolve().year());
    let data = if current.from_source() {
        events_by_month(&current.snapshot, year)
    } else {
        EventsByMonth::sample(year)
    };
    Json(ApiResponse {
        data,
        is_error: current.load_error.is_some(),
        from_source: current.from_source(),
    })
}

/// Expected calvings, including those up to a month overdue
pub async fn get_upcoming_calvings(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Json<ApiResponse<Vec<CalvingScheduleEntry>>> {
    let current = state.store.current();
    Json(ApiResponse {
        data: upcoming_calvings(&current.snapshot, query.resolve()),
        is_error: current.load_error.is_some(),
        from_source: current.from_source(),
    })
}
