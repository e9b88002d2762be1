//! Reproduction & care alert engine
//!
//! Pure rules over immutable [`HerdSnapshot`](crate::models::HerdSnapshot)s.
//! Every consumer (server, browser, export) calls into this module instead of
//! re-deriving the date arithmetic, so there is exactly one set of windows and
//! one test suite. "Today" is always passed in by the caller.

mod aggregator;
mod dashboard;
mod due_dates;
mod index;
mod rules;
mod schedule;
mod stats;

pub use aggregator::*;
pub use dashboard::*;
pub use due_dates::*;
pub use index::*;
pub use rules::*;
pub use schedule::*;
pub use stats::*;
