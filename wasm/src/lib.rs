//! WebAssembly module for Herd Manager
//!
//! Runs the alert engine in the browser so the web dashboard shows exactly
//! what the server and mobile apps show. Inputs and outputs are JSON strings;
//! dates are `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

use shared::{
    classify_animal, events_by_month, upcoming_calvings, AlertAggregator, HerdDashboard,
    RawFarmParameters, GESTATION_DAYS,
};

fn parse_today(today: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(today.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", today, e))
}

fn parse_snapshot(snapshot_json: &str) -> Result<HerdSnapshot, String> {
    HerdSnapshot::from_json(snapshot_json).map_err(|e| e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn dashboard(snapshot_json: &str, today: &str) -> Result<HerdDashboard, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let today = parse_today(today)?;
    Ok(HerdDashboard::evaluate(
        &snapshot,
        &AlertAggregator::default(),
        today,
    ))
}

/// All alerts for a snapshot bundle, soonest first
#[wasm_bindgen]
pub fn compute_alerts(snapshot_json: &str, today: &str) -> Result<String, JsValue> {
    dashboard(snapshot_json, today)
        .and_then(|d| to_json(&d.alerts.alerts))
        .map_err(|e| JsValue::from_str(&e))
}

/// Due-soon count and labelled preview lines for the home card
#[wasm_bindgen]
pub fn compute_alert_summary(snapshot_json: &str, today: &str) -> Result<String, JsValue> {
    dashboard(snapshot_json, today)
        .and_then(|d| to_json(&d.alerts.summary()))
        .map_err(|e| JsValue::from_str(&e))
}

/// Herd statistics, with `dueSoon` matching the alert count
#[wasm_bindgen]
pub fn compute_herd_stats(snapshot_json: &str, today: &str) -> Result<String, JsValue> {
    dashboard(snapshot_json, today)
        .and_then(|d| to_json(&d.stats))
        .map_err(|e| JsValue::from_str(&e))
}

/// Calvings and services per month of `year`
#[wasm_bindgen]
pub fn compute_events_by_month(snapshot_json: &str, year: i32) -> Result<String, JsValue> {
    parse_snapshot(snapshot_json)
        .and_then(|snapshot| to_json(&events_by_month(&snapshot, year)))
        .map_err(|e| JsValue::from_str(&e))
}

/// Calving schedule for the breeding list
#[wasm_bindgen]
pub fn compute_upcoming_calvings(snapshot_json: &str, today: &str) -> Result<String, JsValue> {
    let run = || {
        let snapshot = parse_snapshot(snapshot_json)?;
        to_json(&upcoming_calvings(&snapshot, parse_today(today)?))
    };
    run().map_err(|e| JsValue::from_str(&e))
}

/// Clamp stored farm parameters into their allowed ranges.
///
/// Unparseable input yields the defaults rather than an error.
#[wasm_bindgen]
pub fn clamp_farm_parameters(parameters_json: &str) -> String {
    let raw: RawFarmParameters = serde_json::from_str(parameters_json).unwrap_or_default();
    to_json(&FarmParameters::clamped(raw)).unwrap_or_default()
}

/// Expected calving date, or `undefined` for a malformed service date
#[wasm_bindgen]
pub fn calving_due_date(service_date: &str, gestation_days: i32) -> Option<String> {
    let service = parse_today(service_date).ok()?;
    let gestation = GESTATION_DAYS.clamp(Some(i64::from(gestation_days)));
    add_days(service, i64::from(gestation)).map(|due| due.format("%Y-%m-%d").to_string())
}

/// Category of one animal: Calf, Heifer, Cow, Bull or Steer
#[wasm_bindgen]
pub fn classify_animal_category(animal_json: &str, today: &str) -> Result<String, JsValue> {
    let run = || {
        let animal: Animal =
            serde_json::from_str(animal_json).map_err(|e| format!("Invalid animal JSON: {}", e))?;
        Ok::<_, String>(classify_animal(&animal, parse_today(today)?).to_string())
    };
    run().map_err(|e| JsValue::from_str(&e))
}

/// One-line label for an alert, e.g. "Calving in 3 days"
#[wasm_bindgen]
pub fn format_alert_label(alert_json: &str) -> Result<String, JsValue> {
    serde_json::from_str::<AlertItem>(alert_json)
        .map(|alert| alert.label())
        .map_err(|e| JsValue::from_str(&format!("Invalid alert JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "animals": [
            {"id": "a-1", "earTagNumber": "UK100", "sex": "FEMALE", "dateOfBirth": "2020-04-01"}
        ],
        "breedingEvents": [
            {"id": "b-1", "animalId": "a-1", "serviceDate": "2026-01-01"}
        ],
        "farmParameters": {"calvingAlertDays": 14}
    }"#;

    #[test]
    fn test_dashboard_from_json() {
        let dashboard = dashboard(SNAPSHOT, "2026-10-01").unwrap();
        assert_eq!(dashboard.alerts.due_soon_count, 1);
        assert_eq!(dashboard.alerts.alerts[0].days_until, 10);
        assert_eq!(dashboard.stats.due_soon, 1);
        assert_eq!(dashboard.stats.by_category.cows, 1);
    }

    #[test]
    fn test_bad_inputs_are_errors() {
        assert!(dashboard("{", "2026-10-01").is_err());
        assert!(dashboard(SNAPSHOT, "10/01/2026").is_err());
    }

    #[test]
    fn test_clamp_farm_parameters() {
        let clamped: serde_json::Value =
            serde_json::from_str(&clamp_farm_parameters(r#"{"gestationDays": 1000}"#)).unwrap();
        assert_eq!(clamped["gestationDays"], 320);
        assert_eq!(clamped["calvingAlertDays"], 14);

        let defaults: serde_json::Value =
            serde_json::from_str(&clamp_farm_parameters("not json")).unwrap();
        assert_eq!(defaults["weaningAgeDays"], 200);
    }

    #[test]
    fn test_calving_due_date() {
        assert_eq!(calving_due_date("2026-01-01", 283).as_deref(), Some("2026-10-11"));
        // clamped to 250
        assert_eq!(calving_due_date("2026-01-01", 10).as_deref(), Some("2026-09-08"));
        assert_eq!(calving_due_date("soon", 283), None);
    }

    #[test]
    fn test_classify_animal_category() {
        let steer = r#"{"id": "a-2", "earTagNumber": "UK2", "sex": "MALE", "isCastrated": true, "dateOfBirth": "2024-01-01"}"#;
        assert_eq!(classify_animal_category(steer, "2026-10-16").unwrap(), "Steer");
    }

    #[test]
    fn test_format_alert_label() {
        let alert = r#"{"id": "withdrawal-h-1", "type": "withdrawal", "product": "Penicillin",
            "subjectId": "a-1", "subjectEarTag": "UK1", "dueOrCheckDate": "2026-10-01", "daysUntil": 0}"#;
        assert_eq!(format_alert_label(alert).unwrap(), "Withdrawal ends today");
    }
}
