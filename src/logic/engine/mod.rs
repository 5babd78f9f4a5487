//! Engine Module - Per-asset inference
//!
//! # Architecture
//! - `types.rs`: `PredictionResult`, `PredictionRecord`, `PredictionSource`
//! - `fusion.rs`: `HealthModel`, the confidence-gated fusion of all estimators
//! - `registry.rs`: `AssetRegistry`, asset id → isolated `HealthModel`

pub mod fusion;
pub mod registry;
pub mod types;
#[cfg(test)]
mod tests;

pub use fusion::HealthModel;
pub use registry::AssetRegistry;
pub use types::{PredictionRecord, PredictionResult, PredictionSource};
