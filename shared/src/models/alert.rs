//! Alert models
//!
//! Alerts are derived on every read and never persisted. `days_until` is
//! relative to the day of evaluation, so an alert list must not be reused
//! across calendar days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of alert, with fields only some kinds carry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertKind {
    Calving,
    PregnancyCheck,
    Withdrawal {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        product: Option<String>,
    },
    WeaningWeight,
}

impl AlertKind {
    /// Stable prefix used in synthetic alert ids
    pub fn slug(&self) -> &'static str {
        match self {
            AlertKind::Calving => "calving",
            AlertKind::PregnancyCheck => "pregnancy-check",
            AlertKind::Withdrawal { .. } => "withdrawal",
            AlertKind::WeaningWeight => "weaning",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertKind::Calving => write!(f, "Calving"),
            AlertKind::PregnancyCheck => write!(f, "Pregnancy check"),
            AlertKind::Withdrawal { .. } => write!(f, "Withdrawal"),
            AlertKind::WeaningWeight => write!(f, "Weaning weight"),
        }
    }
}

/// Ear tag shown when the subject animal is not in the herd list
pub const UNKNOWN_EAR_TAG: &str = "Unknown";

/// One "due soon" item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlertItem {
    /// Unique within one evaluation: `{kind}-{source id}`
    pub id: String,
    #[serde(flatten)]
    pub kind: AlertKind,
    /// The animal the alert is about (dam for reproduction alerts)
    pub subject_id: String,
    pub subject_ear_tag: String,
    pub due_or_check_date: NaiveDate,
    /// Negative when overdue
    pub days_until: i64,
}

impl AlertItem {
    pub fn new(
        kind: AlertKind,
        source_id: &str,
        subject_id: impl Into<String>,
        subject_ear_tag: impl Into<String>,
        due: NaiveDate,
        today: NaiveDate,
    ) -> Self {
        Self {
            id: format!("{}-{}", kind.slug(), source_id),
            kind,
            subject_id: subject_id.into(),
            subject_ear_tag: subject_ear_tag.into(),
            due_or_check_date: due,
            days_until: (due - today).num_days(),
        }
    }

    pub fn product(&self) -> Option<&str> {
        match &self.kind {
            AlertKind::Withdrawal { product } => product.as_deref(),
            _ => None,
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.days_until < 0
    }

    /// Compact one-line text for summary cards, e.g. "Calving in 3 days"
    pub fn label(&self) -> String {
        let days = self.days_until;
        let (subject, today_text, ahead_text) = match self.kind {
            AlertKind::Calving => ("Calving", "Calving due today", "Calving in"),
            AlertKind::PregnancyCheck => (
                "Pregnancy check",
                "Pregnancy check due today",
                "Pregnancy check in",
            ),
            AlertKind::Withdrawal { .. } => {
                ("Withdrawal", "Withdrawal ends today", "Withdrawal ends in")
            }
            AlertKind::WeaningWeight => (
                "Weaning weight",
                "Weaning weight due today",
                "Weaning weight in",
            ),
        };
        match days {
            0 => today_text.to_string(),
            d if d < 0 => format!("{} overdue by {}", subject, plural_days(-d)),
            d => format!("{} {}", ahead_text, plural_days(d)),
        }
    }
}

fn plural_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Aggregated alert output for list views and summary cards
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlertReport {
    /// Sorted ascending by due date; ties keep rule order
    pub alerts: Vec<AlertItem>,
    pub due_soon_count: usize,
    /// First few alerts for compact widgets
    pub preview: Vec<AlertItem>,
}

impl AlertReport {
    pub fn summary(&self) -> AlertSummary {
        AlertSummary {
            due_soon_count: self.due_soon_count,
            preview: self
                .preview
                .iter()
                .map(|alert| PreviewLine {
                    subject_id: alert.subject_id.clone(),
                    subject_ear_tag: alert.subject_ear_tag.clone(),
                    label: alert.label(),
                    days_until: alert.days_until,
                })
                .collect(),
        }
    }
}

/// Home-card summary: count plus labelled preview lines
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlertSummary {
    pub due_soon_count: usize,
    pub preview: Vec<PreviewLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreviewLine {
    pub subject_id: String,
    pub subject_ear_tag: String,
    pub label: String,
    pub days_until: i64,
}
