//! In-memory herd store
//!
//! Holds the current [`HerdSnapshot`] behind a `watch` channel. Every write
//! publishes a new `Arc` with a bumped generation, so readers never observe a
//! half-applied change and subscribers learn about every replacement.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::{
    validate_animals, validate_breeding_events, validate_calving_events, validate_health_events,
    validate_weight_records, CalvingEvent, CollectionName, FarmProfile, HerdSnapshot,
};

/// Where the current data came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum DataSource {
    /// Built-in sample herd, no real data yet
    Sample,
    /// Snapshot bundle read from disk
    File(String),
    /// Collections pushed through the API
    Pushed,
}

/// One published version of the store
#[derive(Debug, Clone)]
pub struct StoreState {
    pub snapshot: Arc<HerdSnapshot>,
    pub profile: Arc<FarmProfile>,
    pub generation: u64,
    pub source: DataSource,
    /// Last load failure; the snapshot is then the last known good one
    pub load_error: Option<String>,
}

impl StoreState {
    pub fn from_source(&self) -> bool {
        self.source != DataSource::Sample
    }
}

/// Shared handle to the herd collections
#[derive(Clone)]
pub struct HerdStore {
    tx: Arc<watch::Sender<StoreState>>,
}

impl HerdStore {
    pub fn new(snapshot: HerdSnapshot, source: DataSource) -> Self {
        let profile = FarmProfile {
            parameters: snapshot.farm_parameters,
            ..FarmProfile::default()
        };
        let (tx, _rx) = watch::channel(StoreState {
            snapshot: Arc::new(snapshot),
            profile: Arc::new(profile),
            generation: 0,
            source,
            load_error: None,
        });
        Self { tx: Arc::new(tx) }
    }

    /// Empty store that serves the sample herd until real data arrives
    pub fn sample() -> Self {
        Self::new(HerdSnapshot::default(), DataSource::Sample)
    }

    pub fn current(&self) -> StoreState {
        self.tx.borrow().clone()
    }

    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.tx.subscribe()
    }

    /// Replace the whole snapshot from a JSON bundle on disk.
    ///
    /// On failure the current snapshot stays in place and the error is kept
    /// so reads can report `isError`.
    pub async fn load_file(&self, path: &Path) -> AppResult<()> {
        let result = match tokio::fs::read_to_string(path).await {
            Ok(json) => HerdSnapshot::from_json(&json).map_err(AppError::from),
            Err(e) => Err(AppError::StorageError(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        };

        match result {
            Ok(snapshot) => {
                tracing::info!(
                    path = %path.display(),
                    animals = snapshot.animals.len(),
                    breeding_events = snapshot.breeding_events.len(),
                    "Loaded herd snapshot"
                );
                let source = DataSource::File(path.display().to_string());
                self.tx.send_modify(|state| {
                    state.profile = Arc::new(FarmProfile {
                        parameters: snapshot.farm_parameters,
                        ..(*state.profile).clone()
                    });
                    state.snapshot = Arc::new(snapshot);
                    state.source = source;
                    state.load_error = None;
                    state.generation += 1;
                });
                Ok(())
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), "Snapshot load failed: {}", error);
                let message = error.to_string();
                self.tx.send_modify(|state| {
                    state.load_error = Some(message);
                    state.generation += 1;
                });
                Err(error)
            }
        }
    }

    /// Validate and replace one collection, returning the new generation and
    /// the number of records stored.
    ///
    /// Records are decoded and checked before the write lock is taken. Only
    /// the named collection is swapped under the lock, so concurrent writes
    /// to other collections or to the profile are never lost.
    pub fn replace_collection(&self, name: CollectionName, records: Value) -> AppResult<(u64, usize)> {
        let (generation, count) = match name {
            CollectionName::Animals => {
                let animals = decode(name, records)?;
                validate_animals(&animals)?;
                self.commit(move |snapshot| {
                    snapshot.animals = animals;
                    Ok(snapshot.animals.len())
                })?
            }
            CollectionName::BreedingEvents => {
                let events = decode(name, records)?;
                validate_breeding_events(&events)?;
                self.commit(move |snapshot| {
                    snapshot.breeding_events = events;
                    Ok(snapshot.breeding_events.len())
                })?
            }
            CollectionName::CalvingEvents => {
                let calvings: Vec<CalvingEvent> = decode(name, records)?;
                // Checked under the lock against the breeding events actually stored
                self.commit(move |snapshot| {
                    validate_calving_events(&calvings, &snapshot.breeding_events)?;
                    snapshot.calving_events = calvings;
                    Ok(snapshot.calving_events.len())
                })?
            }
            CollectionName::HealthEvents => {
                let events = decode(name, records)?;
                validate_health_events(&events)?;
                self.commit(move |snapshot| {
                    snapshot.health_events = events;
                    Ok(snapshot.health_events.len())
                })?
            }
            CollectionName::WeightRecords => {
                let records = decode(name, records)?;
                validate_weight_records(&records)?;
                self.commit(move |snapshot| {
                    snapshot.weight_records = records;
                    Ok(snapshot.weight_records.len())
                })?
            }
        };

        tracing::info!(collection = %name, count, generation, "Replaced collection");
        Ok((generation, count))
    }

    /// Apply one change to the latest snapshot under the write lock.
    ///
    /// Nothing is published when `apply` fails.
    fn commit(
        &self,
        apply: impl FnOnce(&mut HerdSnapshot) -> AppResult<usize>,
    ) -> AppResult<(u64, usize)> {
        let mut outcome = Ok((0, 0));
        self.tx.send_if_modified(|state| {
            let mut snapshot = (*state.snapshot).clone();
            match apply(&mut snapshot) {
                Ok(count) => {
                    state.snapshot = Arc::new(snapshot);
                    if state.source == DataSource::Sample {
                        state.source = DataSource::Pushed;
                    }
                    state.load_error = None;
                    state.generation += 1;
                    outcome = Ok((state.generation, count));
                    true
                }
                Err(error) => {
                    outcome = Err(error);
                    false
                }
            }
        });
        outcome
    }

    /// Validate and store the farm profile; its parameters drive the engine
    pub fn update_profile(&self, profile: FarmProfile) -> AppResult<FarmProfile> {
        profile.validate()?;
        let profile = profile.normalized();

        let stored = profile.clone();
        let generation = self.publish(|state| {
            let mut snapshot = (*state.snapshot).clone();
            snapshot.farm_parameters = stored.parameters;
            state.snapshot = Arc::new(snapshot);
            state.profile = Arc::new(stored);
        });
        tracing::info!(generation, "Updated farm profile");
        Ok(profile)
    }

    fn publish(&self, change: impl FnOnce(&mut StoreState)) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|state| {
            change(state);
            state.generation += 1;
            generation = state.generation;
        });
        generation
    }
}

fn decode<T: serde::de::DeserializeOwned>(name: CollectionName, records: Value) -> AppResult<Vec<T>> {
    serde_json::from_value(records)
        .map_err(|e| AppError::BadRequest(format!("{} must be a JSON array of records: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cow(id: &str, tag: &str) -> Value {
        json!({"id": id, "earTagNumber": tag, "sex": "FEMALE", "dateOfBirth": "2020-04-01"})
    }

    #[test]
    fn test_replace_bumps_generation() {
        let store = HerdStore::sample();
        assert_eq!(store.generation(), 0);
        assert!(!store.current().from_source());

        let (generation, count) = store
            .replace_collection(CollectionName::Animals, json!([cow("a-1", "UK1")]))
            .unwrap();
        assert_eq!(generation, 1);
        assert_eq!(count, 1);

        let state = store.current();
        assert_eq!(state.snapshot.animals.len(), 1);
        assert_eq!(state.source, DataSource::Pushed);
        assert!(state.from_source());
    }

    #[test]
    fn test_invalid_collection_is_rejected_without_change() {
        let store = HerdStore::sample();
        let result = store.replace_collection(
            CollectionName::Animals,
            json!([cow("a-1", "UK1"), cow("a-1", "UK2")]),
        );
        assert!(matches!(result, Err(AppError::InvalidRecord(_))));
        assert_eq!(store.generation(), 0);

        let result = store.replace_collection(CollectionName::Animals, json!({"not": "a list"}));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_calvings_checked_against_stored_breeding() {
        let store = HerdStore::sample();
        store
            .replace_collection(
                CollectionName::BreedingEvents,
                json!([{"id": "b-1", "animalId": "a-1", "serviceDate": "2026-03-01"}]),
            )
            .unwrap();
        let result = store.replace_collection(
            CollectionName::CalvingEvents,
            json!([{"id": "c-1", "breedingEventId": "b-1", "damId": "a-1", "actualDate": "2026-02-01"}]),
        );
        assert!(matches!(result, Err(AppError::InvalidRecord(_))));
    }

    #[test]
    fn test_profile_parameters_reach_snapshot() {
        let store = HerdStore::sample();
        let profile: FarmProfile = serde_json::from_value(json!({
            "name": "Hill Farm",
            "gestationDays": 400,
            "contacts": [{"name": " ", "phone": "", "email": ""}]
        }))
        .unwrap();
        let saved = store.update_profile(profile).unwrap();
        assert!(saved.contacts.is_empty());

        let state = store.current();
        assert_eq!(state.snapshot.farm_parameters.gestation_days(), 320);
        assert_eq!(state.profile.name, "Hill Farm");
        assert_eq!(state.generation, 1);
    }

    #[test]
    fn test_profile_with_bad_email_is_rejected() {
        let store = HerdStore::sample();
        let profile: FarmProfile = serde_json::from_value(json!({
            "name": "Hill Farm",
            "contacts": [{"name": "Vet", "phone": "", "email": "not-an-email"}]
        }))
        .unwrap();
        assert!(matches!(
            store.update_profile(profile),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_concurrent_writes_are_not_lost() {
        use std::sync::Barrier;
        use std::thread;

        let breeding: Vec<Value> = (0..500)
            .map(|i| json!({"id": format!("b-{}", i), "animalId": "a-1", "serviceDate": "2026-03-01"}))
            .collect();

        for _ in 0..50 {
            let store = HerdStore::sample();
            let barrier = Arc::new(Barrier::new(3));

            let profile_writer = {
                let store = store.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    let profile: FarmProfile =
                        serde_json::from_value(json!({"name": "Hill Farm", "gestationDays": 300}))
                            .unwrap();
                    barrier.wait();
                    store.update_profile(profile).unwrap();
                })
            };
            let breeding_writer = {
                let store = store.clone();
                let barrier = barrier.clone();
                let breeding = json!(breeding.clone());
                thread::spawn(move || {
                    barrier.wait();
                    store
                        .replace_collection(CollectionName::BreedingEvents, breeding)
                        .unwrap();
                })
            };
            let animal_writer = {
                let store = store.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    store
                        .replace_collection(CollectionName::Animals, json!([cow("a-1", "UK1")]))
                        .unwrap();
                })
            };
            for writer in [profile_writer, breeding_writer, animal_writer] {
                writer.join().unwrap();
            }

            let state = store.current();
            assert_eq!(state.generation, 3);
            assert_eq!(state.snapshot.farm_parameters, state.profile.parameters);
            assert_eq!(state.snapshot.farm_parameters.gestation_days(), 300);
            assert_eq!(state.snapshot.breeding_events.len(), 500);
            assert_eq!(state.snapshot.animals.len(), 1);
        }
    }

    #[test]
    fn test_rejected_calvings_publish_nothing() {
        let store = HerdStore::sample();
        let mut rx = store.subscribe();
        let result = store.replace_collection(
            CollectionName::CalvingEvents,
            json!([{"id": "c-1", "breedingEventId": "", "damId": "a-1", "actualDate": "2026-02-01"}]),
        );
        assert!(matches!(result, Err(AppError::InvalidRecord(_))));
        assert_eq!(store.generation(), 0);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_last_known_good() {
        let store = HerdStore::sample();
        store
            .replace_collection(CollectionName::Animals, json!([cow("a-1", "UK1")]))
            .unwrap();

        let result = store.load_file(Path::new("/nonexistent/herd.json")).await;
        assert!(result.is_err());

        let state = store.current();
        assert_eq!(state.snapshot.animals.len(), 1);
        assert!(state.load_error.is_some());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = HerdStore::sample();
        let mut rx = store.subscribe();
        store
            .replace_collection(CollectionName::Animals, json!([cow("a-1", "UK1")]))
            .unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().generation, 1);
    }
}
