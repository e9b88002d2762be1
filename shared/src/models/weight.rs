//! Weight record models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::flexible_date;

/// A weighing of one animal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightRecord {
    pub id: String,
    #[serde(default)]
    pub animal_id: String,
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub weight_kg: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WeightRecord {
    pub fn new(
        id: impl Into<String>,
        animal_id: impl Into<String>,
        date: NaiveDate,
        weight_kg: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            animal_id: animal_id.into(),
            date: Some(date),
            weight_kg,
            note: None,
        }
    }
}
