//! Fault Module - Rule-based fault labelling
//!
//! - `types.rs`: `FaultClass` and its maintenance metadata
//! - `rules.rs`: per-signal warning/critical thresholds
//! - `classifier.rs`: ordered pattern matcher

pub mod classifier;
pub mod rules;
pub mod types;

pub use classifier::FaultClassifier;
pub use rules::{FaultThresholds, SignalLevels, SignalThresholds};
pub use types::FaultClass;
