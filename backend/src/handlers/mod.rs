//! HTTP handlers for the Herd Manager API

mod alerts;
mod collections;
mod farm;
mod health;
mod stats;

pub use alerts::*;
pub use collections::*;
pub use farm::*;
pub use health::*;
pub use stats::*;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::services::DashboardView;

/// Envelope for every read endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub data: T,
    /// The last load failed and `data` is the last known good or sample
    pub is_error: bool,
    /// False while the sample herd is served
    pub from_source: bool,
}

impl<T> ApiResponse<T> {
    pub fn from_view(view: &DashboardView, data: T) -> Self {
        Self {
            data,
            is_error: view.is_error,
            from_source: view.from_source,
        }
    }
}

/// Optional `?today=YYYY-MM-DD` override, defaulting to the server's local date
#[derive(Debug, Default, Deserialize)]
pub struct TodayQuery {
    pub today: Option<NaiveDate>,
}

impl TodayQuery {
    pub fn resolve(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}
