//! Breeding event models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{add_days, flexible_date, lenient};

/// A recorded service or insemination of a female
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreedingEvent {
    pub id: String,
    /// The dam
    #[serde(default)]
    pub animal_id: String,
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub service_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub event_type: BreedingEventType,
    /// Candidate sires; the first is treated as primary
    #[serde(default)]
    pub sire_ids: Vec<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub pregnancy_check_result: Option<PregnancyCheckResult>,
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub pregnancy_check_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BreedingEvent {
    pub fn new(
        id: impl Into<String>,
        animal_id: impl Into<String>,
        service_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            animal_id: animal_id.into(),
            service_date: Some(service_date),
            event_type: BreedingEventType::default(),
            sire_ids: Vec::new(),
            pregnancy_check_result: None,
            pregnancy_check_date: None,
            notes: None,
        }
    }

    pub fn with_check(mut self, result: PregnancyCheckResult, date: NaiveDate) -> Self {
        self.pregnancy_check_result = Some(result);
        self.pregnancy_check_date = Some(date);
        self
    }

    pub fn primary_sire_id(&self) -> Option<&str> {
        self.sire_ids.first().map(String::as_str)
    }

    /// Expected calving date for the given gestation length
    pub fn due_date(&self, gestation_days: u32) -> Option<NaiveDate> {
        add_days(self.service_date?, i64::from(gestation_days))
    }

    pub fn has_pregnancy_check(&self) -> bool {
        self.pregnancy_check_result.is_some()
    }

    pub fn is_confirmed_open(&self) -> bool {
        self.pregnancy_check_result == Some(PregnancyCheckResult::NotPregnant)
    }
}

/// How the service was performed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreedingEventType {
    Natural,
    #[default]
    #[serde(rename = "AI")]
    Ai,
    EmbryoTransfer,
}

impl std::fmt::Display for BreedingEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreedingEventType::Natural => write!(f, "Natural"),
            BreedingEventType::Ai => write!(f, "AI"),
            BreedingEventType::EmbryoTransfer => write!(f, "Embryo Transfer"),
        }
    }
}

/// Outcome of a pregnancy check
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PregnancyCheckResult {
    Pregnant,
    NotPregnant,
}
