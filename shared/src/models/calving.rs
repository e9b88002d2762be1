//! Calving models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Sex;
use crate::types::{flexible_date, lenient};

/// A birth concluding a breeding event's gestation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalvingEvent {
    pub id: String,
    #[serde(default)]
    pub breeding_event_id: String,
    #[serde(default)]
    pub dam_id: String,
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub actual_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calf_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub calf_sex: Option<Sex>,
    #[serde(default, alias = "calfWeight", deserialize_with = "lenient::optional")]
    pub calf_weight_kg: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub assistance_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CalvingEvent {
    pub fn new(
        id: impl Into<String>,
        breeding_event_id: impl Into<String>,
        dam_id: impl Into<String>,
        actual_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            breeding_event_id: breeding_event_id.into(),
            dam_id: dam_id.into(),
            actual_date: Some(actual_date),
            calf_id: None,
            calf_sex: None,
            calf_weight_kg: None,
            assistance_required: false,
            notes: None,
        }
    }
}
