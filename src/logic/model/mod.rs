//! Model Module - Learned health predictor
//!
//! Small feed-forward network trained online against the deterministic
//! estimator, its history buffer and the fusion thresholds.

pub mod activation;
pub mod buffer;
pub mod network;
pub mod threshold;

pub use buffer::{BufferStatus, HistoryBuffer, HistoryEntry};
pub use network::{HealthNetwork, NetworkConfig, NetworkOutput, NetworkState, TrainingStats, ARCHITECTURE};
pub use threshold::{FusionConfig, FOREST_ANOMALY_THRESHOLD, STATISTICAL_ANOMALY_THRESHOLD};
