//! Alert aggregation

use std::collections::HashSet;

use chrono::NaiveDate;

use super::index::HerdIndex;
use super::rules::{
    calving_alerts, pregnancy_check_alerts, weaning_alerts, withdrawal_alerts, AlertWindows,
};
use crate::models::{AlertItem, AlertReport, HerdSnapshot};

/// Runs every rule over a snapshot and merges the results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertAggregator {
    windows: AlertWindows,
}

impl AlertAggregator {
    pub fn new(windows: AlertWindows) -> Self {
        Self { windows }
    }

    /// Evaluate all rules against `snapshot` as of `today`.
    ///
    /// Pure: the same snapshot and day always give the same report.
    pub fn evaluate(&self, snapshot: &HerdSnapshot, today: NaiveDate) -> AlertReport {
        let index = HerdIndex::build(snapshot);
        let params = &snapshot.farm_parameters;

        let mut candidates = calving_alerts(
            &snapshot.breeding_events,
            &index.calved,
            &index.ear_tags,
            params,
            today,
        );
        candidates.extend(pregnancy_check_alerts(
            &snapshot.breeding_events,
            &index.calved,
            &index.ear_tags,
            params,
            self.windows.pregnancy_check_days(),
            today,
        ));
        candidates.extend(withdrawal_alerts(
            &snapshot.health_events,
            &index.ear_tags,
            today,
        ));
        candidates.extend(weaning_alerts(
            &snapshot.animals,
            &index.weigh_dates,
            &index.ear_tags,
            params,
            today,
        ));

        let report = merge(candidates, self.windows.preview_size());
        tracing::debug!(
            %today,
            alerts = report.due_soon_count,
            "evaluated herd alerts"
        );
        report
    }
}

/// Sort ascending by due date, keeping rule order on ties, and cut the preview.
///
/// Ids are made unique by suffixing repeats, since source ids are only
/// unique when the sync layer behaves.
pub fn merge(mut alerts: Vec<AlertItem>, preview_size: usize) -> AlertReport {
    alerts.sort_by_key(|alert| alert.due_or_check_date);

    let mut seen = HashSet::with_capacity(alerts.len());
    for alert in &mut alerts {
        if !seen.insert(alert.id.clone()) {
            let mut n = 2;
            while seen.contains(&format!("{}-{}", alert.id, n)) {
                n += 1;
            }
            alert.id = format!("{}-{}", alert.id, n);
            seen.insert(alert.id.clone());
        }
    }

    let preview = alerts.iter().take(preview_size).cloned().collect();
    AlertReport {
        due_soon_count: alerts.len(),
        alerts,
        preview,
    }
}
