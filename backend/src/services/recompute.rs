//! Background recomputation after store changes
//!
//! Bursts of writes (a sync pushing five collections back to back) are
//! coalesced: the worker waits until no change has arrived for the quiescence
//! window, evaluates once, and drops the result if the store moved on while
//! it was computing.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::dashboard::DashboardService;
use super::store::{HerdStore, StoreState};

/// Outcome of one recomputation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeOutcome {
    Installed(u64),
    Stale(u64),
}

pub struct RecomputeWorker {
    store: HerdStore,
    dashboard: DashboardService,
    quiescence: Duration,
    today: fn() -> NaiveDate,
}

impl RecomputeWorker {
    pub fn new(store: HerdStore, dashboard: DashboardService, quiescence: Duration) -> Self {
        Self {
            store,
            dashboard,
            quiescence,
            today: local_today,
        }
    }

    /// Subscribes before returning, so no write after this call is missed
    pub fn spawn(self) -> JoinHandle<()> {
        let rx = self.store.subscribe();
        tokio::spawn(self.run(rx))
    }

    async fn run(self, mut rx: watch::Receiver<StoreState>) {
        tracing::debug!(quiescence_ms = self.quiescence.as_millis() as u64, "Recompute worker started");

        while rx.changed().await.is_ok() {
            if !self.settle(&mut rx).await {
                break;
            }
            let state = rx.borrow_and_update().clone();
            match self.recompute(state).await {
                Some(RecomputeOutcome::Installed(generation)) => {
                    tracing::debug!(generation, "Dashboard recomputed");
                }
                Some(RecomputeOutcome::Stale(generation)) => {
                    tracing::debug!(generation, "Discarded stale recomputation");
                }
                None => {}
            }
        }
        tracing::debug!("Store closed, recompute worker stopping");
    }

    /// Wait until the store has been quiet for the quiescence window.
    ///
    /// Returns false when the store was dropped.
    async fn settle(&self, rx: &mut watch::Receiver<StoreState>) -> bool {
        loop {
            match tokio::time::timeout(self.quiescence, rx.changed()).await {
                Ok(Ok(())) => continue,
                Ok(Err(_)) => return false,
                Err(_) => return true,
            }
        }
    }

    async fn recompute(&self, state: StoreState) -> Option<RecomputeOutcome> {
        let generation = state.generation;
        let today = (self.today)();
        let service = self.dashboard.clone();

        let dashboard = match tokio::task::spawn_blocking(move || service.compute(&state, today)).await
        {
            Ok(dashboard) => dashboard,
            Err(e) => {
                tracing::error!("Recomputation task failed: {}", e);
                return None;
            }
        };

        if self.store.generation() != generation {
            return Some(RecomputeOutcome::Stale(generation));
        }
        if self.dashboard.install(generation, today, Arc::new(dashboard)) {
            Some(RecomputeOutcome::Installed(generation))
        } else {
            Some(RecomputeOutcome::Stale(generation))
        }
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::{AlertAggregator, CollectionName};

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
    }

    fn setup() -> (HerdStore, DashboardService, RecomputeWorker) {
        let store = HerdStore::sample();
        let dashboard = DashboardService::new(store.clone(), AlertAggregator::default());
        let mut worker =
            RecomputeWorker::new(store.clone(), dashboard.clone(), Duration::from_millis(50));
        worker.today = fixed_today;
        (store, dashboard, worker)
    }

    fn push_breeding(store: &HerdStore, id: &str) {
        store
            .replace_collection(
                CollectionName::BreedingEvents,
                json!([{"id": id, "animalId": "a-1", "serviceDate": "2026-01-01"}]),
            )
            .unwrap();
    }

    #[tokio::test]
    async fn test_recompute_discards_stale_result() {
        let (store, dashboard, worker) = setup();
        push_breeding(&store, "b-1");
        let state = store.current();
        push_breeding(&store, "b-2");

        let outcome = worker.recompute(state).await;
        assert_eq!(outcome, Some(RecomputeOutcome::Stale(1)));
        assert_eq!(dashboard.cached_generation(), None);

        let outcome = worker.recompute(store.current()).await;
        assert_eq!(outcome, Some(RecomputeOutcome::Installed(2)));
    }

    #[tokio::test]
    async fn test_burst_settles_on_latest_generation() {
        let (store, dashboard, worker) = setup();
        let handle = worker.spawn();

        push_breeding(&store, "b-1");
        push_breeding(&store, "b-2");
        push_breeding(&store, "b-3");

        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if dashboard.cached_generation() == Some(3) {
                break;
            }
        }
        assert_eq!(dashboard.cached_generation(), Some(3));
        handle.abort();
    }
}
