//! HTTP handlers for replacing materialized collections

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::AppState;
use shared::CollectionName;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionUpdated {
    pub collection: CollectionName,
    pub count: usize,
    pub generation: u64,
}

/// Replace one collection with the posted list of records
pub async fn replace_collection(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(records): Json<Value>,
) -> AppResult<Json<CollectionUpdated>> {
    let collection: CollectionName = name
        .parse()
        .map_err(|_| AppError::NotFound(format!("Collection '{}'", name)))?;
    let (generation, count) = state.store.replace_collection(collection, records)?;
    Ok(Json(CollectionUpdated {
        collection,
        count,
        generation,
    }))
}
