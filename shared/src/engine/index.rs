//! Lookups built once per evaluation so each rule stays a single pass

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::models::{Animal, CalvingEvent, HerdSnapshot, WeightRecord, UNKNOWN_EAR_TAG};

/// Breeding event ids that already have a recorded calving
#[derive(Debug, Default)]
pub struct CalvedSet<'a> {
    ids: HashSet<&'a str>,
}

impl<'a> CalvedSet<'a> {
    pub fn from_calvings(calvings: &'a [CalvingEvent]) -> Self {
        let ids = calvings
            .iter()
            .map(|calving| calving.breeding_event_id.as_str())
            .filter(|id| !id.is_empty())
            .collect();
        Self { ids }
    }

    pub fn contains(&self, breeding_event_id: &str) -> bool {
        self.ids.contains(breeding_event_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Animal id to display ear tag
#[derive(Debug, Default)]
pub struct EarTags<'a> {
    tags: HashMap<&'a str, &'a str>,
}

impl<'a> EarTags<'a> {
    pub fn from_animals(animals: &'a [Animal]) -> Self {
        let tags = animals
            .iter()
            .map(|animal| {
                let tag = animal.ear_tag_number.trim();
                let shown = if tag.is_empty() { animal.id.as_str() } else { tag };
                (animal.id.as_str(), shown)
            })
            .collect();
        Self { tags }
    }

    /// Falls back to the id for a blank tag and to "Unknown" for a missing animal
    pub fn get(&self, animal_id: &str) -> &'a str {
        self.tags.get(animal_id).copied().unwrap_or(UNKNOWN_EAR_TAG)
    }
}

/// Weigh dates per animal; records without a date are left out
#[derive(Debug, Default)]
pub struct WeighDates<'a> {
    dates: HashMap<&'a str, Vec<NaiveDate>>,
}

impl<'a> WeighDates<'a> {
    pub fn from_records(records: &'a [WeightRecord]) -> Self {
        let mut dates: HashMap<&'a str, Vec<NaiveDate>> = HashMap::new();
        for record in records {
            if let Some(date) = record.date {
                dates.entry(record.animal_id.as_str()).or_default().push(date);
            }
        }
        Self { dates }
    }

    /// True if the animal has any weight recorded on or after `since`
    pub fn weighed_since(&self, animal_id: &str, since: NaiveDate) -> bool {
        self.dates
            .get(animal_id)
            .is_some_and(|dates| dates.iter().any(|date| *date >= since))
    }
}

/// Every lookup the alert rules need for one snapshot
#[derive(Debug)]
pub struct HerdIndex<'a> {
    pub calved: CalvedSet<'a>,
    pub ear_tags: EarTags<'a>,
    pub weigh_dates: WeighDates<'a>,
}

impl<'a> HerdIndex<'a> {
    pub fn build(snapshot: &'a HerdSnapshot) -> Self {
        Self {
            calved: CalvedSet::from_calvings(&snapshot.calving_events),
            ear_tags: EarTags::from_animals(&snapshot.animals),
            weigh_dates: WeighDates::from_records(&snapshot.weight_records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sex;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calved_set_ignores_blank_references() {
        let calvings = vec![
            CalvingEvent::new("c-1", "b-1", "a-1", date(2026, 3, 1)),
            CalvingEvent::new("c-2", "", "a-2", date(2026, 3, 2)),
        ];
        let calved = CalvedSet::from_calvings(&calvings);
        assert!(calved.contains("b-1"));
        assert!(!calved.contains(""));
        assert_eq!(calved.len(), 1);
    }

    #[test]
    fn test_ear_tag_fallbacks() {
        let animals = vec![
            Animal::new("a-1", "UK123", Sex::Female, date(2020, 1, 1)),
            Animal::new("a-2", "  ", Sex::Female, date(2020, 1, 1)),
        ];
        let tags = EarTags::from_animals(&animals);
        assert_eq!(tags.get("a-1"), "UK123");
        assert_eq!(tags.get("a-2"), "a-2");
        assert_eq!(tags.get("a-9"), UNKNOWN_EAR_TAG);
    }

    #[test]
    fn test_weighed_since_is_inclusive() {
        let records = vec![WeightRecord::new("w-1", "a-1", date(2026, 7, 6), Decimal::new(210, 0))];
        let weighed = WeighDates::from_records(&records);
        assert!(weighed.weighed_since("a-1", date(2026, 7, 6)));
        assert!(!weighed.weighed_since("a-1", date(2026, 7, 7)));
        assert!(!weighed.weighed_since("a-2", date(2026, 1, 1)));
    }
}
