//! Business logic services for the Herd Manager server

pub mod dashboard;
pub mod recompute;
pub mod store;

pub use dashboard::{DashboardService, DashboardView};
pub use recompute::RecomputeWorker;
pub use store::{DataSource, HerdStore, StoreState};
