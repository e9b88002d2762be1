//! Combined alert + statistics evaluation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aggregator::AlertAggregator;
use super::stats::herd_stats;
use crate::models::{AlertReport, HerdSnapshot, HerdStats};

/// Everything the home screen shows, derived from one snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HerdDashboard {
    pub alerts: AlertReport,
    pub stats: HerdStats,
}

impl HerdDashboard {
    /// `stats.due_soon` always equals `alerts.due_soon_count`
    pub fn evaluate(
        snapshot: &HerdSnapshot,
        aggregator: &AlertAggregator,
        today: NaiveDate,
    ) -> Self {
        let alerts = aggregator.evaluate(snapshot, today);
        let stats = herd_stats(snapshot, today).with_due_soon(alerts.due_soon_count);
        Self { alerts, stats }
    }
}
