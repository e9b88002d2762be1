//! Shared types and the alert engine for the Herd Manager platform
//!
//! This crate contains the herd record models and the pure reproduction &
//! care rules shared between the backend, the browser client (via WASM),
//! and any other consumer. Nothing in here performs I/O.

pub mod engine;
pub mod models;
pub mod types;
pub mod validation;

pub use engine::*;
pub use models::*;
pub use types::*;
pub use validation::*;
