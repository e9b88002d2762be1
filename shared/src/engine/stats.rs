//! Herd statistics

use chrono::{Datelike, NaiveDate};

use super::due_dates::months_old;
use super::index::CalvedSet;
use crate::models::{Animal, AnimalCategory, EventsByMonth, HerdSnapshot, HerdStats};

/// Animals younger than this many months are calves
pub const CALF_MAX_MONTHS: i64 = 12;

/// Females younger than this many months are heifers
pub const HEIFER_MAX_MONTHS: i64 = 24;

/// Classify one animal by age, sex and castration, first match wins.
///
/// An animal of unrecorded sex is a heifer while under 24 months and a bull
/// otherwise; a female with no date of birth is a cow.
pub fn classify_animal(animal: &Animal, today: NaiveDate) -> AnimalCategory {
    let months = months_old(animal, today);
    if months.is_some_and(|m| m < CALF_MAX_MONTHS) {
        AnimalCategory::Calf
    } else if animal.is_steer() {
        AnimalCategory::Steer
    } else if animal.is_male() {
        AnimalCategory::Bull
    } else if months.is_some_and(|m| m < HEIFER_MAX_MONTHS) {
        AnimalCategory::Heifer
    } else if animal.is_female() {
        AnimalCategory::Cow
    } else {
        AnimalCategory::Bull
    }
}

/// Herd counts as of `today`.
///
/// `due_soon` is left at zero; it belongs to the alert report and is filled
/// in by [`HerdDashboard`](super::HerdDashboard).
pub fn herd_stats(snapshot: &HerdSnapshot, today: NaiveDate) -> HerdStats {
    let mut stats = HerdStats::empty();
    stats.total_animals = snapshot.animals.len();

    for animal in &snapshot.animals {
        *stats.by_status.entry(animal.status).or_default() += 1;
        if let Some(sex) = animal.sex {
            *stats.by_sex.entry(sex).or_default() += 1;
        }
        stats.by_category.record(classify_animal(animal, today));
    }

    let year = today.year();
    stats.calvings_this_year = snapshot
        .calving_events
        .iter()
        .filter(|calving| calving.actual_date.is_some_and(|d| d.year() == year))
        .count();
    stats.breeding_events_this_year = snapshot
        .breeding_events
        .iter()
        .filter(|event| event.service_date.is_some_and(|d| d.year() == year))
        .count();

    let calved = CalvedSet::from_calvings(&snapshot.calving_events);
    stats.open_pregnant = snapshot
        .breeding_events
        .iter()
        .filter(|event| !calved.contains(&event.id) && !event.is_confirmed_open())
        .count();

    stats
}

/// Calvings and services per calendar month of `year`
pub fn events_by_month(snapshot: &HerdSnapshot, year: i32) -> EventsByMonth {
    let mut months = EventsByMonth::empty(year);
    let month_index = |date: NaiveDate| (date.year() == year).then(|| date.month0() as usize);

    for index in snapshot
        .calving_events
        .iter()
        .filter_map(|calving| calving.actual_date.and_then(month_index))
    {
        months.calvings_by_month[index] += 1;
    }
    for index in snapshot
        .breeding_events
        .iter()
        .filter_map(|event| event.service_date.and_then(month_index))
    {
        months.breeding_by_month[index] += 1;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnimalStatus, BreedingEvent, CalvingEvent, PregnancyCheckResult, Sex};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 16)
    }

    #[test]
    fn test_classify_by_age_and_sex() {
        let today = today();
        let calf = Animal::new("1", "T1", Sex::Male, date(2025, 12, 16));
        let heifer = Animal::new("2", "T2", Sex::Female, date(2025, 4, 1));
        let cow = Animal::new("3", "T3", Sex::Female, date(2020, 4, 1));
        let bull = Animal::new("4", "T4", Sex::Male, date(2022, 4, 1));
        let steer = Animal::new("5", "T5", Sex::Male, date(2024, 4, 1)).castrated(true);

        assert_eq!(classify_animal(&calf, today), AnimalCategory::Calf);
        assert_eq!(classify_animal(&heifer, today), AnimalCategory::Heifer);
        assert_eq!(classify_animal(&cow, today), AnimalCategory::Cow);
        assert_eq!(classify_animal(&bull, today), AnimalCategory::Bull);
        assert_eq!(classify_animal(&steer, today), AnimalCategory::Steer);
    }

    #[test]
    fn test_young_male_steer_is_still_a_calf() {
        let animal = Animal::new("1", "T1", Sex::Male, date(2026, 6, 1)).castrated(true);
        assert_eq!(classify_animal(&animal, today()), AnimalCategory::Calf);
    }

    #[test]
    fn test_classify_without_birth_date() {
        let mut female = Animal::new("1", "T1", Sex::Female, date(2020, 1, 1));
        female.date_of_birth = None;
        assert_eq!(classify_animal(&female, today()), AnimalCategory::Cow);

        let mut unknown = female.clone();
        unknown.sex = None;
        assert_eq!(classify_animal(&unknown, today()), AnimalCategory::Bull);

        // sex unrecorded, age known
        unknown.date_of_birth = Some(date(2020, 1, 1));
        assert_eq!(classify_animal(&unknown, today()), AnimalCategory::Bull);
        unknown.date_of_birth = Some(date(2025, 6, 1));
        assert_eq!(classify_animal(&unknown, today()), AnimalCategory::Heifer);
    }

    #[test]
    fn test_herd_stats_counts() {
        let mut no_sex = Animal::new("4", "T4", Sex::Female, date(2020, 1, 1))
            .with_status(AnimalStatus::Sold);
        no_sex.sex = None;
        let snapshot = HerdSnapshot {
            animals: vec![
                Animal::new("1", "T1", Sex::Female, date(2020, 1, 1)),
                Animal::new("2", "T2", Sex::Female, date(2020, 1, 1)),
                Animal::new("3", "T3", Sex::Male, date(2026, 8, 1)),
                no_sex,
            ],
            breeding_events: vec![
                BreedingEvent::new("b-1", "1", date(2025, 11, 1)),
                BreedingEvent::new("b-2", "2", date(2026, 2, 1)),
                BreedingEvent::new("b-3", "2", date(2026, 5, 1))
                    .with_check(PregnancyCheckResult::NotPregnant, date(2026, 6, 1)),
            ],
            calving_events: vec![CalvingEvent::new("c-1", "b-1", "1", date(2026, 8, 1))],
            ..Default::default()
        };

        let stats = herd_stats(&snapshot, today());
        assert_eq!(stats.total_animals, 4);
        assert_eq!(stats.by_status[&AnimalStatus::Active], 3);
        assert_eq!(stats.by_status[&AnimalStatus::Sold], 1);
        assert_eq!(stats.by_status[&AnimalStatus::Culled], 0);
        assert_eq!(stats.by_sex[&Sex::Female], 2);
        assert_eq!(stats.by_sex[&Sex::Male], 1);
        assert_eq!(stats.by_category.total(), 4);
        assert_eq!(stats.by_category.calves, 1);
        assert_eq!(stats.calvings_this_year, 1);
        assert_eq!(stats.breeding_events_this_year, 2);
        assert_eq!(stats.open_pregnant, 1);
        assert_eq!(stats.due_soon, 0);
    }

    #[test]
    fn test_events_by_month() {
        let snapshot = HerdSnapshot {
            breeding_events: vec![
                BreedingEvent::new("b-1", "1", date(2026, 1, 5)),
                BreedingEvent::new("b-2", "1", date(2026, 1, 25)),
                BreedingEvent::new("b-3", "1", date(2025, 1, 5)),
            ],
            calving_events: vec![CalvingEvent::new("c-1", "b-1", "1", date(2026, 12, 31))],
            ..Default::default()
        };
        let months = events_by_month(&snapshot, 2026);
        assert_eq!(months.breeding_by_month[0], 2);
        assert_eq!(months.calvings_by_month[11], 1);
        assert_eq!(months.breeding_by_month.iter().sum::<usize>(), 2);
    }
}
