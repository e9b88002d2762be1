//! Animal models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{flexible_date, lenient};

/// An animal on the farm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: String,
    #[serde(default)]
    pub ear_tag_number: String,
    /// None when the stored value is missing or unrecognised
    #[serde(default, deserialize_with = "lenient::optional")]
    pub sex: Option<Sex>,
    /// Only meaningful for males
    #[serde(default, deserialize_with = "lenient::optional")]
    pub is_castrated: Option<bool>,
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: AnimalStatus,
    #[serde(default)]
    pub current_herd_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sire_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dam_id: Option<String>,
}

impl Animal {
    pub fn new(
        id: impl Into<String>,
        ear_tag_number: impl Into<String>,
        sex: Sex,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            ear_tag_number: ear_tag_number.into(),
            sex: Some(sex),
            is_castrated: None,
            date_of_birth: Some(date_of_birth),
            status: AnimalStatus::Active,
            current_herd_id: None,
            name: None,
            breed: None,
            sire_id: None,
            dam_id: None,
        }
    }

    pub fn castrated(mut self, castrated: bool) -> Self {
        self.is_castrated = Some(castrated);
        self
    }

    pub fn with_status(mut self, status: AnimalStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_female(&self) -> bool {
        self.sex == Some(Sex::Female)
    }

    pub fn is_male(&self) -> bool {
        self.sex == Some(Sex::Male)
    }

    pub fn is_steer(&self) -> bool {
        self.is_male() && self.is_castrated == Some(true)
    }
}

/// Sex of an animal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sex::Male => write!(f, "Male"),
            Sex::Female => write!(f, "Female"),
        }
    }
}

/// Herd membership status
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimalStatus {
    #[default]
    Active,
    Sold,
    Deceased,
    Culled,
    AcquiredFrom,
}

impl AnimalStatus {
    pub const ALL: [AnimalStatus; 5] = [
        AnimalStatus::Active,
        AnimalStatus::Sold,
        AnimalStatus::Deceased,
        AnimalStatus::Culled,
        AnimalStatus::AcquiredFrom,
    ];
}

impl std::fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimalStatus::Active => write!(f, "Active"),
            AnimalStatus::Sold => write!(f, "Sold"),
            AnimalStatus::Deceased => write!(f, "Deceased"),
            AnimalStatus::Culled => write!(f, "Culled"),
            AnimalStatus::AcquiredFrom => write!(f, "Acquired From"),
        }
    }
}
