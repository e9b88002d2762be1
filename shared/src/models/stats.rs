//! Herd statistics models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AnimalStatus, Sex};

/// Cattle category by age, sex and castration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AnimalCategory {
    Calf,
    Heifer,
    Cow,
    Bull,
    Steer,
}

impl std::fmt::Display for AnimalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimalCategory::Calf => write!(f, "Calf"),
            AnimalCategory::Heifer => write!(f, "Heifer"),
            AnimalCategory::Cow => write!(f, "Cow"),
            AnimalCategory::Bull => write!(f, "Bull"),
            AnimalCategory::Steer => write!(f, "Steer"),
        }
    }
}

/// Head count per category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryBreakdown {
    pub calves: usize,
    pub heifers: usize,
    pub cows: usize,
    pub bulls: usize,
    pub steers: usize,
}

impl CategoryBreakdown {
    pub fn record(&mut self, category: AnimalCategory) {
        match category {
            AnimalCategory::Calf => self.calves += 1,
            AnimalCategory::Heifer => self.heifers += 1,
            AnimalCategory::Cow => self.cows += 1,
            AnimalCategory::Bull => self.bulls += 1,
            AnimalCategory::Steer => self.steers += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.calves + self.heifers + self.cows + self.bulls + self.steers
    }
}

/// Dashboard herd statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HerdStats {
    pub total_animals: usize,
    /// Number of alerts in their due-soon windows
    pub due_soon: usize,
    pub calvings_this_year: usize,
    pub breeding_events_this_year: usize,
    pub open_pregnant: usize,
    /// Every status is present, zero when no animal has it
    pub by_status: BTreeMap<AnimalStatus, usize>,
    /// Animals with an unrecognised sex are not counted here
    pub by_sex: BTreeMap<Sex, usize>,
    pub by_category: CategoryBreakdown,
}

impl HerdStats {
    /// Zero counts with every status and sex key present
    pub fn empty() -> Self {
        Self {
            total_animals: 0,
            due_soon: 0,
            calvings_this_year: 0,
            breeding_events_this_year: 0,
            open_pregnant: 0,
            by_status: AnimalStatus::ALL.iter().map(|s| (*s, 0)).collect(),
            by_sex: Sex::ALL.iter().map(|s| (*s, 0)).collect(),
            by_category: CategoryBreakdown::default(),
        }
    }

    /// Sample herd shown when no data source is available
    pub fn sample() -> Self {
        Self {
            total_animals: 124,
            due_soon: 5,
            calvings_this_year: 18,
            breeding_events_this_year: 24,
            open_pregnant: 12,
            by_status: BTreeMap::from([
                (AnimalStatus::Active, 107),
                (AnimalStatus::Sold, 12),
                (AnimalStatus::Deceased, 2),
                (AnimalStatus::Culled, 3),
                (AnimalStatus::AcquiredFrom, 0),
            ]),
            by_sex: BTreeMap::from([(Sex::Male, 8), (Sex::Female, 116)]),
            by_category: CategoryBreakdown {
                calves: 22,
                heifers: 18,
                cows: 76,
                bulls: 6,
                steers: 2,
            },
        }
    }

    pub fn with_due_soon(mut self, due_soon: usize) -> Self {
        self.due_soon = due_soon;
        self
    }
}

impl Default for HerdStats {
    fn default() -> Self {
        Self::empty()
    }
}

/// Calvings and breeding services per month of one year, January first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventsByMonth {
    pub year: i32,
    pub calvings_by_month: [usize; 12],
    pub breeding_by_month: [usize; 12],
}

impl EventsByMonth {
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            calvings_by_month: [0; 12],
            breeding_by_month: [0; 12],
        }
    }

    /// Monthly split of the sample herd's yearly totals
    pub fn sample(year: i32) -> Self {
        Self {
            year,
            calvings_by_month: [0, 3, 6, 5, 2, 1, 0, 0, 0, 1, 0, 0],
            breeding_by_month: [0, 0, 0, 1, 4, 6, 7, 4, 2, 0, 0, 0],
        }
    }
}
