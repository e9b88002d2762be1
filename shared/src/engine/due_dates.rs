//! Due date calculation
//!
//! Each function maps one record and one parameter to a calendar date. A
//! missing or malformed date on the record gives `None`, which the rules treat
//! as "no alert for this record".

use chrono::{Datelike, NaiveDate};

use crate::models::{Animal, BreedingEvent, HealthEvent};
use crate::types::add_days;

/// `serviceDate + gestationDays`
pub fn calving_due_date(event: &BreedingEvent, gestation_days: u32) -> Option<NaiveDate> {
    event.due_date(gestation_days)
}

/// `serviceDate + pregnancyCheckDaysAfterBreeding`
pub fn pregnancy_check_due_date(event: &BreedingEvent, check_days: u32) -> Option<NaiveDate> {
    add_days(event.service_date?, i64::from(check_days))
}

/// The stored withdrawal end, if any
pub fn withdrawal_end_date(event: &HealthEvent) -> Option<NaiveDate> {
    event.withdrawal_period_end
}

/// `dateOfBirth + weaningAgeDays`
pub fn weaning_due_date(animal: &Animal, weaning_age_days: u32) -> Option<NaiveDate> {
    add_days(animal.date_of_birth?, i64::from(weaning_age_days))
}

/// Whole calendar months completed between birth and `today`.
///
/// Negative when the date of birth lies in the future.
pub fn months_old(animal: &Animal, today: NaiveDate) -> Option<i64> {
    let born = animal.date_of_birth?;
    let mut months = i64::from(today.year() - born.year()) * 12
        + i64::from(today.month()) - i64::from(born.month());
    if months > 0 && today.day() < born.day() {
        months -= 1;
    } else if months < 0 && today.day() > born.day() {
        months += 1;
    }
    Some(months)
}

/// Signed whole days from `today` to `date`
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}
