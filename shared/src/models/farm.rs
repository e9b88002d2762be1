//! Farm profile and farm-configurable reproduction parameters

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::lenient;

/// Valid range and default for one farm parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl ParameterRange {
    pub const fn new(min: u32, max: u32, default: u32) -> Self {
        Self { min, max, default }
    }

    /// Clamp any raw input into range; missing input takes the default
    pub fn clamp(&self, raw: Option<i64>) -> u32 {
        match raw {
            Some(value) => value.clamp(i64::from(self.min), i64::from(self.max)) as u32,
            None => self.default,
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const CALVING_ALERT_DAYS: ParameterRange = ParameterRange::new(1, 90, 14);
pub const PREGNANCY_CHECK_DAYS_AFTER_BREEDING: ParameterRange = ParameterRange::new(14, 60, 28);
pub const GESTATION_DAYS: ParameterRange = ParameterRange::new(250, 320, 283);
pub const WEANING_AGE_DAYS: ParameterRange = ParameterRange::new(150, 300, 200);

/// Raw parameter values as stored; anything non-numeric reads as missing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFarmParameters {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub calving_alert_days: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub pregnancy_check_days_after_breeding: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub gestation_days: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub weaning_age_days: Option<i64>,
}

/// Farm-configurable durations, always held in range.
///
/// Fields are private so that every value that exists has passed through
/// [`ParameterRange::clamp`]; deserialization goes through the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFarmParameters", rename_all = "camelCase")]
pub struct FarmParameters {
    calving_alert_days: u32,
    pregnancy_check_days_after_breeding: u32,
    gestation_days: u32,
    weaning_age_days: u32,
}

impl FarmParameters {
    pub fn clamped(raw: RawFarmParameters) -> Self {
        Self {
            calving_alert_days: CALVING_ALERT_DAYS.clamp(raw.calving_alert_days),
            pregnancy_check_days_after_breeding: PREGNANCY_CHECK_DAYS_AFTER_BREEDING
                .clamp(raw.pregnancy_check_days_after_breeding),
            gestation_days: GESTATION_DAYS.clamp(raw.gestation_days),
            weaning_age_days: WEANING_AGE_DAYS.clamp(raw.weaning_age_days),
        }
    }

    /// Build from explicit values, clamping each one
    pub fn new(
        calving_alert_days: i64,
        pregnancy_check_days_after_breeding: i64,
        gestation_days: i64,
        weaning_age_days: i64,
    ) -> Self {
        Self::clamped(RawFarmParameters {
            calving_alert_days: Some(calving_alert_days),
            pregnancy_check_days_after_breeding: Some(pregnancy_check_days_after_breeding),
            gestation_days: Some(gestation_days),
            weaning_age_days: Some(weaning_age_days),
        })
    }

    pub fn calving_alert_days(&self) -> u32 {
        self.calving_alert_days
    }

    pub fn pregnancy_check_days_after_breeding(&self) -> u32 {
        self.pregnancy_check_days_after_breeding
    }

    pub fn gestation_days(&self) -> u32 {
        self.gestation_days
    }

    pub fn weaning_age_days(&self) -> u32 {
        self.weaning_age_days
    }
}

impl Default for FarmParameters {
    fn default() -> Self {
        Self::clamped(RawFarmParameters::default())
    }
}

impl From<RawFarmParameters> for FarmParameters {
    fn from(raw: RawFarmParameters) -> Self {
        Self::clamped(raw)
    }
}

pub const DEFAULT_FARM_ID: &str = "default-farm";

/// A single farm contact
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct FarmContact {
    #[serde(default)]
    #[validate(length(max = 120))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 40))]
    pub phone: String,
    #[serde(default)]
    #[validate(custom = "validate_optional_email")]
    pub email: String,
}

impl FarmContact {
    pub fn has_any(&self) -> bool {
        !self.name.trim().is_empty()
            || !self.phone.trim().is_empty()
            || !self.email.trim().is_empty()
    }

    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

fn validate_optional_email(email: &str) -> Result<(), validator::ValidationError> {
    let email = email.trim();
    if email.is_empty() || validator::validate_email(email) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("email"))
    }
}

/// Farm profile shared by every device on the account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FarmProfile {
    #[serde(default = "default_farm_id")]
    pub id: String,
    #[serde(default)]
    #[validate(length(max = 120))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub address: String,
    #[serde(default)]
    #[validate]
    pub contacts: Vec<FarmContact>,
    /// Missing keys take their defaults
    #[serde(flatten)]
    pub parameters: FarmParameters,
}

fn default_farm_id() -> String {
    DEFAULT_FARM_ID.to_string()
}

impl Default for FarmProfile {
    fn default() -> Self {
        Self {
            id: default_farm_id(),
            name: String::new(),
            address: String::new(),
            contacts: Vec::new(),
            parameters: FarmParameters::default(),
        }
    }
}

impl FarmProfile {
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            "My Farm"
        } else {
            name
        }
    }

    /// Normalise before storing: blank contacts dropped, text trimmed
    pub fn normalized(&self) -> Self {
        Self {
            id: if self.id.trim().is_empty() {
                default_farm_id()
            } else {
                self.id.trim().to_string()
            },
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            contacts: self
                .contacts
                .iter()
                .filter(|c| c.has_any())
                .map(FarmContact::trimmed)
                .collect(),
            parameters: self.parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = FarmParameters::default();
        assert_eq!(params.calving_alert_days(), 14);
        assert_eq!(params.pregnancy_check_days_after_breeding(), 28);
        assert_eq!(params.gestation_days(), 283);
        assert_eq!(params.weaning_age_days(), 200);
    }

    #[test]
    fn test_clamps_to_nearest_bound() {
        let params = FarmParameters::new(0, 100, 1000, -5);
        assert_eq!(params.calving_alert_days(), 1);
        assert_eq!(params.pregnancy_check_days_after_breeding(), 60);
        assert_eq!(params.gestation_days(), 320);
        assert_eq!(params.weaning_age_days(), 150);
    }

    #[test]
    fn test_deserialize_clamps_and_defaults() {
        let json = r#"{"calvingAlertDays": 365, "gestationDays": "long", "weaningAgeDays": 180}"#;
        let params: FarmParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.calving_alert_days(), 90);
        assert_eq!(params.pregnancy_check_days_after_breeding(), 28);
        assert_eq!(params.gestation_days(), 283);
        assert_eq!(params.weaning_age_days(), 180);
    }

    #[test]
    fn test_serialize_camel_case() {
        let value = serde_json::to_value(FarmParameters::default()).unwrap();
        assert_eq!(value["calvingAlertDays"], 14);
        assert_eq!(value["pregnancyCheckDaysAfterBreeding"], 28);
    }

    #[test]
    fn test_profile_normalized_drops_blank_contacts() {
        let profile = FarmProfile {
            name: "  Hill Farm ".into(),
            contacts: vec![
                FarmContact::default(),
                FarmContact {
                    name: " Ann ".into(),
                    phone: String::new(),
                    email: " ann@example.com ".into(),
                },
            ],
            ..FarmProfile::default()
        };
        let normalized = profile.normalized();
        assert_eq!(normalized.display_name(), "Hill Farm");
        assert_eq!(normalized.contacts.len(), 1);
        assert_eq!(normalized.contacts[0].email, "ann@example.com");
    }

    #[test]
    fn test_profile_validation_rejects_bad_email() {
        let profile = FarmProfile {
            contacts: vec![FarmContact {
                name: "Ann".into(),
                phone: String::new(),
                email: "not-an-email".into(),
            }],
            ..FarmProfile::default()
        };
        assert!(profile.validate().is_err());
        assert!(FarmProfile::default().validate().is_ok());
        assert_eq!(FarmProfile::default().display_name(), "My Farm");
    }
}
