//! Dashboard evaluation with a generation-keyed cache
//!
//! The cache holds one evaluation for a `(generation, today)` pair. A store
//! write bumps the generation, so the next read recomputes. A new calendar
//! day does the same since `daysUntil` is relative to it.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use super::store::{HerdStore, StoreState};
use shared::{AlertAggregator, AlertReport, HerdDashboard, HerdStats};

/// A dashboard together with where it came from
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub dashboard: Arc<HerdDashboard>,
    pub generation: u64,
    /// Last load failed; the data shown is the last known good or sample
    pub is_error: bool,
    /// False while the sample herd is shown
    pub from_source: bool,
}

#[derive(Debug, Clone)]
struct CachedDashboard {
    generation: u64,
    today: NaiveDate,
    dashboard: Arc<HerdDashboard>,
}

/// Dashboard service shared by handlers and the recompute worker
#[derive(Clone)]
pub struct DashboardService {
    store: HerdStore,
    aggregator: AlertAggregator,
    cache: Arc<Mutex<Option<CachedDashboard>>>,
}

impl DashboardService {
    pub fn new(store: HerdStore, aggregator: AlertAggregator) -> Self {
        Self {
            store,
            aggregator,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// Current dashboard for `today`, recomputing only when stale
    pub fn view(&self, today: NaiveDate) -> DashboardView {
        let state = self.store.current();
        let dashboard = match self.cached(state.generation, today) {
            Some(dashboard) => dashboard,
            None => {
                let dashboard = Arc::new(self.compute(&state, today));
                self.install(state.generation, today, dashboard.clone());
                dashboard
            }
        };
        DashboardView {
            dashboard,
            generation: state.generation,
            is_error: state.load_error.is_some(),
            from_source: state.from_source(),
        }
    }

    /// Pure evaluation of one store state; the sample herd has no alerts
    pub fn compute(&self, state: &StoreState, today: NaiveDate) -> HerdDashboard {
        if state.from_source() {
            HerdDashboard::evaluate(&state.snapshot, &self.aggregator, today)
        } else {
            HerdDashboard {
                alerts: AlertReport::default(),
                stats: HerdStats::sample(),
            }
        }
    }

    /// Store a finished evaluation unless a newer one is already cached.
    ///
    /// Returns false when the result was discarded.
    pub fn install(&self, generation: u64, today: NaiveDate, dashboard: Arc<HerdDashboard>) -> bool {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = cache.as_ref() {
            if existing.generation > generation
                || (existing.generation == generation && existing.today > today)
            {
                return false;
            }
        }
        *cache = Some(CachedDashboard {
            generation,
            today,
            dashboard,
        });
        true
    }

    fn cached(&self, generation: u64, today: NaiveDate) -> Option<Arc<HerdDashboard>> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache
            .as_ref()
            .filter(|c| c.generation == generation && c.today == today)
            .map(|c| c.dashboard.clone())
    }

    pub fn cached_generation(&self) -> Option<u64> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.as_ref().map(|c| c.generation)
    }
}
