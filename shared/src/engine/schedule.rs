//! Calving schedule for the breeding list view

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::due_dates::{calving_due_date, days_until};
use super::index::{CalvedSet, EarTags};
use crate::models::{HerdSnapshot, PregnancyCheckResult};
use crate::types::add_days;

/// Services whose due date passed longer ago than this drop off the schedule
pub const SCHEDULE_LOOKBACK_DAYS: i64 = 30;

/// One expected calving
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalvingScheduleEntry {
    pub breeding_event_id: String,
    pub dam_id: String,
    pub dam_ear_tag: String,
    pub service_date: NaiveDate,
    pub due_date: NaiveDate,
    pub days_until: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregnancy_check_result: Option<PregnancyCheckResult>,
}

/// Uncalved services due from a month ago onward, soonest first.
///
/// Confirmed-open services stay listed so the check result can be shown.
pub fn upcoming_calvings(snapshot: &HerdSnapshot, today: NaiveDate) -> Vec<CalvingScheduleEntry> {
    let Some(earliest) = add_days(today, -SCHEDULE_LOOKBACK_DAYS) else {
        return Vec::new();
    };
    let calved = CalvedSet::from_calvings(&snapshot.calving_events);
    let ear_tags = EarTags::from_animals(&snapshot.animals);
    let gestation = snapshot.farm_parameters.gestation_days();

    let mut entries: Vec<_> = snapshot
        .breeding_events
        .iter()
        .filter(|event| !calved.contains(&event.id))
        .filter_map(|event| {
            let service_date = event.service_date?;
            let due_date = calving_due_date(event, gestation)?;
            (due_date >= earliest).then(|| CalvingScheduleEntry {
                breeding_event_id: event.id.clone(),
                dam_id: event.animal_id.clone(),
                dam_ear_tag: ear_tags.get(&event.animal_id).to_string(),
                service_date,
                due_date,
                days_until: days_until(due_date, today),
                pregnancy_check_result: event.pregnancy_check_result,
            })
        })
        .collect();
    entries.sort_by_key(|entry| entry.due_date);
    entries
}
