//! Logic Module - Inference engine
//!
//! Leaves first:
//! - `signals/` - Signal layout, input samples, normalization
//! - `baseline/` - Drift tracking (EWMA)
//! - `health/` - Deterministic estimator, status bands, RUL
//! - `model/` - Online-trained network, history buffer, fusion thresholds
//! - `anomaly/` - Statistical and isolation-forest detectors
//! - `fault/` - Rule-based fault labels
//! - `engine/` - Per-asset fusion and the asset registry
//! - `status/` - Diagnostics snapshots

pub mod signals;
pub mod baseline;
pub mod health;
pub mod model;
pub mod anomaly;
pub mod fault;
pub mod engine;
pub mod status;

pub mod config;
