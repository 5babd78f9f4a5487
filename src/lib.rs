//! AssetSense Core - Predictive health inference for mechanical assets
//!
//! Streams temperature / vibration / current samples through a per-asset
//! model that combines a deterministic penalty estimator, an online-trained
//! network, a drift tracker and an outlier detector.

pub mod constants;
pub mod logic;

pub use logic::config::{ConfigError, EngineConfig, SignalSource};
pub use logic::engine::{AssetRegistry, HealthModel, PredictionRecord, PredictionResult, PredictionSource};
pub use logic::signals::{IngestRecord, Sample};
