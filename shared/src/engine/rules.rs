//! Alert rules
//!
//! Each rule scans one collection and emits an alert for every record whose
//! due date falls inside that rule's window. Windows are closed on both ends.
//! Records with a missing or malformed date are skipped, never an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::due_dates::{
    calving_due_date, pregnancy_check_due_date, weaning_due_date, withdrawal_end_date,
};
use super::index::{CalvedSet, EarTags, WeighDates};
use crate::models::{
    AlertItem, AlertKind, Animal, BreedingEvent, FarmParameters, HealthEvent, ParameterRange,
};
use crate::types::{add_days, DateRange};

// ============================================================================
// Windows
// ============================================================================

/// Withdrawal alerts look this many days ahead
pub const WITHDRAWAL_WINDOW_DAYS: u32 = 14;

/// Weaning alerts look this many days ahead
pub const WEANING_ALERT_WINDOW_DAYS: u32 = 14;

/// Weaning alerts stay visible this many days after the due date
pub const WEANING_OVERDUE_DAYS: u32 = 30;

/// A weight this many days before weaning due already counts as the weaning weight
pub const WEANING_WEIGHT_LOOKBACK_DAYS: u32 = 14;

/// Pregnancy-check look-ahead, in days
pub const PREGNANCY_CHECK_WINDOW_DAYS: ParameterRange = ParameterRange::new(1, 90, 14);

/// Length of the compact preview list
pub const DEFAULT_PREVIEW_SIZE: usize = 3;

/// Deployment-level alert settings that are not per-farm parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertWindows {
    pregnancy_check_days: u32,
    preview_size: usize,
}

impl AlertWindows {
    pub fn new(pregnancy_check_days: i64, preview_size: usize) -> Self {
        Self {
            pregnancy_check_days: PREGNANCY_CHECK_WINDOW_DAYS.clamp(Some(pregnancy_check_days)),
            preview_size,
        }
    }

    pub fn pregnancy_check_days(&self) -> u32 {
        self.pregnancy_check_days
    }

    pub fn preview_size(&self) -> usize {
        self.preview_size
    }
}

impl Default for AlertWindows {
    fn default() -> Self {
        Self {
            pregnancy_check_days: PREGNANCY_CHECK_WINDOW_DAYS.default,
            preview_size: DEFAULT_PREVIEW_SIZE,
        }
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Expected calvings within `calvingAlertDays`, excluding events already calved
pub fn calving_alerts(
    events: &[BreedingEvent],
    calved: &CalvedSet<'_>,
    ear_tags: &EarTags<'_>,
    params: &FarmParameters,
    today: NaiveDate,
) -> Vec<AlertItem> {
    let Some(window) = DateRange::around(today, 0, params.calving_alert_days()) else {
        return Vec::new();
    };

    events
        .iter()
        .filter(|event| !calved.contains(&event.id))
        .filter_map(|event| {
            let Some(due) = calving_due_date(event, params.gestation_days()) else {
                tracing::trace!(breeding_event = %event.id, "no service date, skipping calving alert");
                return None;
            };
            window.contains(due).then(|| {
                AlertItem::new(
                    AlertKind::Calving,
                    &event.id,
                    event.animal_id.as_str(),
                    ear_tags.get(&event.animal_id),
                    due,
                    today,
                )
            })
        })
        .collect()
}

/// Unchecked, uncalved services whose check date falls within `window_days`
pub fn pregnancy_check_alerts(
    events: &[BreedingEvent],
    calved: &CalvedSet<'_>,
    ear_tags: &EarTags<'_>,
    params: &FarmParameters,
    window_days: u32,
    today: NaiveDate,
) -> Vec<AlertItem> {
    let Some(window) = DateRange::around(today, 0, window_days) else {
        return Vec::new();
    };

    events
        .iter()
        .filter(|event| !event.has_pregnancy_check() && !calved.contains(&event.id))
        .filter_map(|event| {
            let due = pregnancy_check_due_date(event, params.pregnancy_check_days_after_breeding())?;
            window.contains(due).then(|| {
                AlertItem::new(
                    AlertKind::PregnancyCheck,
                    &event.id,
                    event.animal_id.as_str(),
                    ear_tags.get(&event.animal_id),
                    due,
                    today,
                )
            })
        })
        .collect()
}

/// Withdrawal periods ending within the next two weeks
pub fn withdrawal_alerts(
    events: &[HealthEvent],
    ear_tags: &EarTags<'_>,
    today: NaiveDate,
) -> Vec<AlertItem> {
    let Some(window) = DateRange::around(today, 0, WITHDRAWAL_WINDOW_DAYS) else {
        return Vec::new();
    };

    events
        .iter()
        .filter_map(|event| {
            let end = withdrawal_end_date(event)?;
            window.contains(end).then(|| {
                AlertItem::new(
                    AlertKind::Withdrawal {
                        product: event.product_name().map(str::to_string),
                    },
                    &event.id,
                    event.animal_id.as_str(),
                    ear_tags.get(&event.animal_id),
                    end,
                    today,
                )
            })
        })
        .collect()
}

/// Calves around weaning age that have no weaning weight yet.
///
/// The window reaches back [`WEANING_OVERDUE_DAYS`] so overdue weigh-ins stay
/// visible, which is the only rule that yields negative `days_until`.
pub fn weaning_alerts(
    animals: &[Animal],
    weigh_dates: &WeighDates<'_>,
    ear_tags: &EarTags<'_>,
    params: &FarmParameters,
    today: NaiveDate,
) -> Vec<AlertItem> {
    let Some(window) = DateRange::around(today, WEANING_OVERDUE_DAYS, WEANING_ALERT_WINDOW_DAYS)
    else {
        return Vec::new();
    };

    animals
        .iter()
        .filter_map(|animal| {
            let due = weaning_due_date(animal, params.weaning_age_days())?;
            if !window.contains(due) {
                return None;
            }
            let since = add_days(due, -i64::from(WEANING_WEIGHT_LOOKBACK_DAYS))?;
            if weigh_dates.weighed_since(&animal.id, since) {
                tracing::trace!(animal = %animal.id, "weaning weight already recorded");
                return None;
            }
            Some(AlertItem::new(
                AlertKind::WeaningWeight,
                &animal.id,
                animal.id.as_str(),
                ear_tags.get(&animal.id),
                due,
                today,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalvingEvent, PregnancyCheckResult, Sex, WeightRecord};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cow() -> Vec<Animal> {
        vec![Animal::new("a-1", "UK100", Sex::Female, date(2020, 4, 1))]
    }

    // ========================================================================
    // Calving
    // ========================================================================

    #[test]
    fn test_calving_alert_in_window() {
        let animals = cow();
        let events = vec![BreedingEvent::new("b-1", "a-1", date(2026, 1, 1))];
        let alerts = calving_alerts(
            &events,
            &CalvedSet::default(),
            &EarTags::from_animals(&animals),
            &FarmParameters::default(),
            date(2026, 10, 1),
        );
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "calving-b-1");
        assert_eq!(alerts[0].due_or_check_date, date(2026, 10, 11));
        assert_eq!(alerts[0].days_until, 10);
        assert_eq!(alerts[0].subject_ear_tag, "UK100");
    }

    #[test]
    fn test_calving_alert_suppressed_once_calved() {
        let events = vec![BreedingEvent::new("b-1", "a-1", date(2026, 1, 1))];
        let calvings = vec![CalvingEvent::new("c-1", "b-1", "a-1", date(2026, 10, 9))];
        let alerts = calving_alerts(
            &events,
            &CalvedSet::from_calvings(&calvings),
            &EarTags::default(),
            &FarmParameters::default(),
            date(2026, 10, 1),
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_calving_window_edges() {
        let events = vec![BreedingEvent::new("b-1", "a-1", date(2026, 1, 1))];
        let params = FarmParameters::default();
        let run = |today| {
            calving_alerts(&events, &CalvedSet::default(), &EarTags::default(), &params, today)
        };
        // due 2026-10-11, window is 14 days
        assert_eq!(run(date(2026, 9, 27)).len(), 1);
        assert_eq!(run(date(2026, 9, 26)).len(), 0);
        assert_eq!(run(date(2026, 10, 11)).len(), 1);
        assert_eq!(run(date(2026, 10, 12)).len(), 0);
    }

    #[test]
    fn test_calving_uses_unknown_tag_for_missing_dam() {
        let events = vec![BreedingEvent::new("b-1", "ghost", date(2026, 1, 1))];
        let alerts = calving_alerts(
            &events,
            &CalvedSet::default(),
            &EarTags::default(),
            &FarmParameters::default(),
            date(2026, 10, 1),
        );
        assert_eq!(alerts[0].subject_ear_tag, "Unknown");
    }

    #[test]
    fn test_missing_service_date_is_skipped() {
        let mut event = BreedingEvent::new("b-1", "a-1", date(2026, 1, 1));
        event.service_date = None;
        let events = vec![event];
        let today = date(2026, 10, 1);
        let params = FarmParameters::default();
        assert!(calving_alerts(&events, &CalvedSet::default(), &EarTags::default(), &params, today)
            .is_empty());
        assert!(pregnancy_check_alerts(
            &events,
            &CalvedSet::default(),
            &EarTags::default(),
            &params,
            14,
            today
        )
        .is_empty());
    }

    // ========================================================================
    // Pregnancy check
    // ========================================================================

    #[test]
    fn test_pregnancy_check_alert() {
        let events = vec![BreedingEvent::new("b-1", "a-1", date(2026, 1, 1))];
        let alerts = pregnancy_check_alerts(
            &events,
            &CalvedSet::default(),
            &EarTags::default(),
            &FarmParameters::default(),
            14,
            date(2026, 1, 20),
        );
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].due_or_check_date, date(2026, 1, 29));
        assert_eq!(alerts[0].days_until, 9);
    }

    #[test]
    fn test_pregnancy_check_skipped_once_checked() {
        let events = vec![BreedingEvent::new("b-1", "a-1", date(2026, 1, 1))
            .with_check(PregnancyCheckResult::Pregnant, date(2026, 1, 28))];
        let alerts = pregnancy_check_alerts(
            &events,
            &CalvedSet::default(),
            &EarTags::default(),
            &FarmParameters::default(),
            14,
            date(2026, 1, 20),
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_pregnancy_check_respects_custom_offset() {
        let events = vec![BreedingEvent::new("b-1", "a-1", date(2026, 1, 1))];
        let params = FarmParameters::new(14, 45, 283, 200);
        let alerts = pregnancy_check_alerts(
            &events,
            &CalvedSet::default(),
            &EarTags::default(),
            &params,
            14,
            date(2026, 2, 10),
        );
        assert_eq!(alerts[0].due_or_check_date, date(2026, 2, 15));
    }

    // ========================================================================
    // Withdrawal
    // ========================================================================

    #[test]
    fn test_withdrawal_alert_carries_product() {
        let events = vec![HealthEvent::new("h-1", "a-1", date(2026, 9, 20))
            .with_withdrawal(Some("Oxytetracycline"), date(2026, 10, 6))];
        let animals = cow();
        let alerts = withdrawal_alerts(&events, &EarTags::from_animals(&animals), date(2026, 10, 1));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].product(), Some("Oxytetracycline"));
        assert_eq!(alerts[0].days_until, 5);
    }

    #[test]
    fn test_withdrawal_outside_window() {
        let events = vec![
            HealthEvent::new("h-1", "a-1", date(2026, 9, 1)).with_withdrawal(None, date(2026, 9, 30)),
            HealthEvent::new("h-2", "a-1", date(2026, 9, 1)).with_withdrawal(None, date(2026, 10, 16)),
            HealthEvent::new("h-3", "a-1", date(2026, 9, 1)),
        ];
        let alerts = withdrawal_alerts(&events, &EarTags::default(), date(2026, 10, 1));
        assert!(alerts.is_empty());
    }

    // ========================================================================
    // Weaning
    // ========================================================================

    fn calf_born(born: NaiveDate) -> Vec<Animal> {
        vec![Animal::new("calf-1", "UK900", Sex::Male, born)]
    }

    #[test]
    fn test_weaning_alert_for_calf_without_weight() {
        // due 2026-10-11
        let animals = calf_born(date(2026, 3, 25));
        let alerts = weaning_alerts(
            &animals,
            &WeighDates::default(),
            &EarTags::from_animals(&animals),
            &FarmParameters::default(),
            date(2026, 10, 1),
        );
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "weaning-calf-1");
        assert_eq!(alerts[0].subject_id, "calf-1");
        assert_eq!(alerts[0].due_or_check_date, date(2026, 10, 11));
    }

    #[test]
    fn test_weaning_overdue_alert() {
        // due 2026-09-21, ten days overdue
        let animals = calf_born(date(2026, 3, 5));
        let alerts = weaning_alerts(
            &animals,
            &WeighDates::default(),
            &EarTags::from_animals(&animals),
            &FarmParameters::default(),
            date(2026, 10, 1),
        );
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].days_until, -10);
    }

    #[test]
    fn test_weaning_suppressed_by_recent_weight() {
        let animals = calf_born(date(2026, 3, 25));
        let records = vec![WeightRecord::new("w-1", "calf-1", date(2026, 9, 27), Decimal::new(230, 0))];
        let alerts = weaning_alerts(
            &animals,
            &WeighDates::from_records(&records),
            &EarTags::from_animals(&animals),
            &FarmParameters::default(),
            date(2026, 10, 1),
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_weaning_not_suppressed_by_old_weight() {
        let animals = calf_born(date(2026, 3, 25));
        let records = vec![WeightRecord::new("w-1", "calf-1", date(2026, 3, 26), Decimal::new(40, 0))];
        let alerts = weaning_alerts(
            &animals,
            &WeighDates::from_records(&records),
            &EarTags::from_animals(&animals),
            &FarmParameters::default(),
            date(2026, 10, 1),
        );
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn test_alert_windows_clamp() {
        assert_eq!(AlertWindows::new(0, 3).pregnancy_check_days(), 1);
        assert_eq!(AlertWindows::new(500, 3).pregnancy_check_days(), 90);
        assert_eq!(AlertWindows::default().pregnancy_check_days(), 14);
        assert_eq!(AlertWindows::default().preview_size(), 3);
    }
}
