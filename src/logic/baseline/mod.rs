//! Baseline Module - Drift tracking of the operating point
//!
//! Keeps an exponentially weighted picture of each asset's "normal" so the
//! health estimator can work on smoothed signals instead of raw noise.
//!
//! # Architecture
//! - `types.rs`: `DriftConfig`, `DriftState`, `DriftSnapshot`
//! - `drift.rs`: `DriftTracker` (EWMA mean/variance with shock response)

pub mod types;
pub mod drift;

pub use types::{DriftConfig, DriftSnapshot, DriftState, SignalBaseline};
pub use drift::DriftTracker;
