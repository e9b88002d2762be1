//! Common types used across the platform

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days between 0001-01-01 (CE day 1) and 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Stored numbers above this are epoch milliseconds, below it epoch days
const EPOCH_MILLIS_THRESHOLD: f64 = 1e12;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Closed calendar-day interval `[start, end]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window from `today - behind` to `today + ahead`, both ends inclusive.
    /// Returns None if either end falls outside the representable calendar.
    pub fn around(today: NaiveDate, behind: u32, ahead: u32) -> Option<Self> {
        let start = add_days(today, -i64::from(behind))?;
        let end = add_days(today, i64::from(ahead))?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The calendar year containing `date`
    pub fn year_of(date: NaiveDate) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(date.year(), 1, 1)?;
        let end = NaiveDate::from_ymd_opt(date.year(), 12, 31)?;
        Some(Self { start, end })
    }
}

/// Add a signed number of days to a date without panicking on overflow
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let ce = i64::from(date.num_days_from_ce()).checked_add(days)?;
    NaiveDate::from_num_days_from_ce_opt(i32::try_from(ce).ok()?)
}

/// Convert an epoch-day count into a calendar date
pub fn date_from_epoch_day(epoch_day: i64) -> Option<NaiveDate> {
    let ce = epoch_day.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?;
    NaiveDate::from_num_days_from_ce_opt(i32::try_from(ce).ok()?)
}

/// Epoch-day count for a calendar date
pub fn epoch_day(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
}

/// Lenient date decoding for records coming out of the sync layer.
///
/// Mobile and cloud stores have written dates as ISO strings, epoch days, and
/// epoch milliseconds over time. Anything that is none of those decodes to
/// `None` so that one bad record never fails the whole collection.
pub mod flexible_date {
    use super::*;
    use serde::de::{Deserializer, IgnoredAny};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Integer(i64),
        Float(f64),
        Text(String),
        Other(IgnoredAny),
    }

    /// Interpret a stored number as epoch days or epoch millis
    pub fn from_number(value: f64) -> Option<NaiveDate> {
        if !value.is_finite() {
            return None;
        }
        let days = if value > EPOCH_MILLIS_THRESHOLD {
            (value as i64).div_euclid(MILLIS_PER_DAY)
        } else {
            value.floor() as i64
        };
        date_from_epoch_day(days)
    }

    /// Interpret a stored string: ISO date first, then a numeric string
    pub fn from_text(value: &str) -> Option<NaiveDate> {
        let trimmed = value.trim();
        // Full timestamps keep only their date part
        let date_part = trimmed.get(..10).unwrap_or(trimmed);
        if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            return Some(date);
        }
        trimmed.parse::<f64>().ok().and_then(from_number)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawDate::deserialize(deserializer)?;
        Ok(match raw {
            RawDate::Integer(n) => from_number(n as f64),
            RawDate::Float(f) => from_number(f),
            RawDate::Text(s) => from_text(&s),
            RawDate::Other(_) => None,
        })
    }
}

/// Lenient decoding for enums and flags written by older clients
pub mod lenient {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Known(T),
        Unknown(IgnoredAny),
    }

    /// Unknown or malformed values become `None`
    pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(match Lenient::<T>::deserialize(deserializer)? {
            Lenient::Known(value) => Some(value),
            Lenient::Unknown(_) => None,
        })
    }

    /// Unknown or malformed values fall back to `T::default()`
    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(optional(deserializer)?.unwrap_or_default())
    }
}
