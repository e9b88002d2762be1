//! Health treatment models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{flexible_date, lenient};

/// A vaccination, treatment or other health record for one animal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthEvent {
    pub id: String,
    #[serde(default)]
    pub animal_id: String,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub event_type: Option<HealthEventType>,
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    /// Day the animal's milk/meat becomes usable again
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub withdrawal_period_end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl HealthEvent {
    pub fn new(id: impl Into<String>, animal_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            animal_id: animal_id.into(),
            event_type: Some(HealthEventType::Treatment),
            date: Some(date),
            product: None,
            dosage: None,
            withdrawal_period_end: None,
            notes: None,
        }
    }

    pub fn with_withdrawal(mut self, product: Option<&str>, end: NaiveDate) -> Self {
        self.product = product.map(str::to_string);
        self.withdrawal_period_end = Some(end);
        self
    }

    /// Product name, ignoring blank entries
    pub fn product_name(&self) -> Option<&str> {
        self.product
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Kind of health record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthEventType {
    Vaccination,
    Treatment,
    Disease,
    Withdrawal,
    Castration,
}
