//! Domain models for the Herd Manager platform

mod alert;
mod animal;
mod breeding;
mod calving;
mod farm;
mod health;
mod snapshot;
mod stats;
mod weight;

pub use alert::*;
pub use animal::*;
pub use breeding::*;
pub use calving::*;
pub use farm::*;
pub use health::*;
pub use snapshot::*;
pub use stats::*;
pub use weight::*;
