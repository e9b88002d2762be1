//! HTTP handlers for the farm profile

use axum::{extract::State, Json};

use super::ApiResponse;
use crate::error::AppResult;
use crate::AppState;
use shared::FarmProfile;

/// Current farm profile with its clamped parameters
pub async fn get_farm(State(state): State<AppState>) -> Json<ApiResponse<FarmProfile>> {
    let current = state.store.current();
    Json(ApiResponse {
        data: (*current.profile).clone(),
        is_error: current.load_error.is_some(),
        from_source: current.from_source(),
    })
}

/// Save the farm profile; out-of-range parameters are clamped, not rejected
pub async fn update_farm(
    State(state): State<AppState>,
    Json(profile): Json<FarmProfile>,
) -> AppResult<Json<FarmProfile>> {
    let saved = state.store.update_profile(profile)?;
    Ok(Json(saved))
}
