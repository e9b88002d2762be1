//! Validation for records entering the herd collections
//!
//! These checks run where data is written. The alert engine never calls them
//! and tolerates whatever the sync layer hands it.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::{Animal, BreedingEvent, CalvingEvent, HealthEvent, WeightRecord};

/// One rejected record
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{field} on record '{record_id}': {message}")]
pub struct RecordError {
    pub record_id: String,
    pub field: &'static str,
    pub message: &'static str,
}

impl RecordError {
    pub fn new(record_id: &str, field: &'static str, message: &'static str) -> Self {
        Self {
            record_id: record_id.to_string(),
            field,
            message,
        }
    }
}

fn require(id: &str, field: &'static str, value: &str) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::new(id, field, "must not be empty"));
    }
    Ok(())
}

// ============================================================================
// Field Validations
// ============================================================================

/// Validate that a weight is strictly positive
pub fn validate_weight(weight_kg: Decimal) -> Result<(), &'static str> {
    if weight_kg <= Decimal::ZERO {
        return Err("Weight must be greater than zero");
    }
    Ok(())
}

/// Validate that ids are unique within one collection
pub fn validate_unique_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Result<(), RecordError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RecordError::new(id, "id", "duplicate id in collection"));
        }
    }
    Ok(())
}

// ============================================================================
// Record Validations
// ============================================================================

pub fn validate_animal(animal: &Animal) -> Result<(), RecordError> {
    require(&animal.id, "id", &animal.id)?;
    require(&animal.id, "earTagNumber", &animal.ear_tag_number)
}

pub fn validate_breeding_event(event: &BreedingEvent) -> Result<(), RecordError> {
    require(&event.id, "id", &event.id)?;
    require(&event.id, "animalId", &event.animal_id)?;
    if let (Some(service), Some(check)) = (event.service_date, event.pregnancy_check_date) {
        if check < service {
            return Err(RecordError::new(
                &event.id,
                "pregnancyCheckDate",
                "must not be before the service date",
            ));
        }
    }
    Ok(())
}

pub fn validate_calving_event(calving: &CalvingEvent) -> Result<(), RecordError> {
    require(&calving.id, "id", &calving.id)?;
    require(&calving.id, "breedingEventId", &calving.breeding_event_id)?;
    require(&calving.id, "damId", &calving.dam_id)?;
    if let Some(weight) = calving.calf_weight_kg {
        validate_weight(weight)
            .map_err(|_| RecordError::new(&calving.id, "calfWeight", "must be greater than zero"))?;
    }
    Ok(())
}

pub fn validate_health_event(event: &HealthEvent) -> Result<(), RecordError> {
    require(&event.id, "id", &event.id)?;
    require(&event.id, "animalId", &event.animal_id)?;
    if let (Some(date), Some(end)) = (event.date, event.withdrawal_period_end) {
        if end < date {
            return Err(RecordError::new(
                &event.id,
                "withdrawalPeriodEnd",
                "must not be before the treatment date",
            ));
        }
    }
    Ok(())
}

pub fn validate_weight_record(record: &WeightRecord) -> Result<(), RecordError> {
    require(&record.id, "id", &record.id)?;
    require(&record.id, "animalId", &record.animal_id)?;
    validate_weight(record.weight_kg)
        .map_err(|_| RecordError::new(&record.id, "weightKg", "must be greater than zero"))
}

// ============================================================================
// Collection Validations
// ============================================================================

pub fn validate_animals(animals: &[Animal]) -> Result<(), RecordError> {
    animals.iter().try_for_each(validate_animal)?;
    validate_unique_ids(animals.iter().map(|a| a.id.as_str()))
}

pub fn validate_breeding_events(events: &[BreedingEvent]) -> Result<(), RecordError> {
    events.iter().try_for_each(validate_breeding_event)?;
    validate_unique_ids(events.iter().map(|e| e.id.as_str()))
}

/// Calvings are also checked against the service date of the breeding they
/// close, when that breeding is known
pub fn validate_calving_events(
    calvings: &[CalvingEvent],
    breeding_events: &[BreedingEvent],
) -> Result<(), RecordError> {
    calvings.iter().try_for_each(validate_calving_event)?;
    validate_unique_ids(calvings.iter().map(|c| c.id.as_str()))?;

    let service_dates: HashMap<&str, _> = breeding_events
        .iter()
        .filter_map(|event| Some((event.id.as_str(), event.service_date?)))
        .collect();
    for calving in calvings {
        let service = service_dates.get(calving.breeding_event_id.as_str());
        if let (Some(service), Some(actual)) = (service, calving.actual_date) {
            if actual < *service {
                return Err(RecordError::new(
                    &calving.id,
                    "actualDate",
                    "must not be before the service date",
                ));
            }
        }
    }
    Ok(())
}

pub fn validate_health_events(events: &[HealthEvent]) -> Result<(), RecordError> {
    events.iter().try_for_each(validate_health_event)?;
    validate_unique_ids(events.iter().map(|e| e.id.as_str()))
}

pub fn validate_weight_records(records: &[WeightRecord]) -> Result<(), RecordError> {
    records.iter().try_for_each(validate_weight_record)?;
    validate_unique_ids(records.iter().map(|r| r.id.as_str()))
}
