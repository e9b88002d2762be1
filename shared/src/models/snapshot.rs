//! The bundle of materialized collections the engine reads

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Animal, BreedingEvent, CalvingEvent, FarmParameters, HealthEvent, WeightRecord};

/// Errors decoding a snapshot bundle
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Invalid snapshot JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Immutable view of every collection at one point in time.
///
/// Each collection is a plain list exactly as the sync layer materialized it.
/// Missing collections read as empty and missing parameters as defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HerdSnapshot {
    #[serde(default)]
    pub animals: Vec<Animal>,
    #[serde(default)]
    pub breeding_events: Vec<BreedingEvent>,
    #[serde(default)]
    pub calving_events: Vec<CalvingEvent>,
    #[serde(default)]
    pub health_events: Vec<HealthEvent>,
    #[serde(default)]
    pub weight_records: Vec<WeightRecord>,
    #[serde(default)]
    pub farm_parameters: FarmParameters,
}

impl HerdSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Name of one collection in a snapshot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionName {
    Animals,
    BreedingEvents,
    CalvingEvents,
    HealthEvents,
    WeightRecords,
}

impl CollectionName {
    pub const ALL: [CollectionName; 5] = [
        CollectionName::Animals,
        CollectionName::BreedingEvents,
        CollectionName::CalvingEvents,
        CollectionName::HealthEvents,
        CollectionName::WeightRecords,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Animals => "animals",
            CollectionName::BreedingEvents => "breeding-events",
            CollectionName::CalvingEvents => "calving-events",
            CollectionName::HealthEvents => "health-events",
            CollectionName::WeightRecords => "weight-records",
        }
    }
}

impl std::str::FromStr for CollectionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("unknown collection '{}'", s))
    }
}

impl std::fmt::Display for CollectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
