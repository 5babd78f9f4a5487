//! Anomaly Module - Outlier scoring behind one contract
//!
//! Two interchangeable scorers, both returning a score in [0, 1]:
//! - `statistical.rs`: z-score of the model input against the history buffer
//! - `forest.rs`: isolation forest over raw samples, rebuilt per `schedule.rs`
//!
//! The forest scores a sample before it enters the rolling buffer.

pub mod forest;
pub mod schedule;
pub mod statistical;
pub mod types;
#[cfg(test)]
mod tests;

pub use forest::{ForestConfig, IsolationForest, IsolationTree};
pub use schedule::{ForestPhase, RebuildPolicy};
pub use statistical::{StatisticalConfig, StatisticalDetector};
pub use types::{AnomalyOutcome, DetectorKind, DetectorStatus};

use rand::Rng;

use crate::logic::model::{FusionConfig, HistoryBuffer};
use crate::logic::signals::SignalVector;

#[derive(Debug, Clone)]
pub enum AnomalyDetector {
    Statistical(StatisticalDetector),
    IsolationForest(IsolationForest),
}

impl AnomalyDetector {
    pub fn new(kind: DetectorKind, statistical: &StatisticalConfig, forest: &ForestConfig) -> Self {
        match kind {
            DetectorKind::Statistical => {
                AnomalyDetector::Statistical(StatisticalDetector::new(statistical.clone()))
            }
            DetectorKind::IsolationForest => {
                AnomalyDetector::IsolationForest(IsolationForest::new(forest.clone()))
            }
        }
    }

    pub fn kind(&self) -> DetectorKind {
        match self {
            AnomalyDetector::Statistical(_) => DetectorKind::Statistical,
            AnomalyDetector::IsolationForest(_) => DetectorKind::IsolationForest,
        }
    }

    /// Cut-off applied to the combined score for this detector
    pub fn threshold(&self, fusion: &FusionConfig) -> f32 {
        match self {
            AnomalyDetector::Statistical(_) => fusion.statistical_threshold,
            AnomalyDetector::IsolationForest(_) => fusion.forest_threshold,
        }
    }

    /// Score one sample.
    ///
    /// `raw` is the sample as received, `input` the vector the model trains on
    /// (raw or drift-smoothed). The statistical scorer compares `input` with
    /// the history; the forest scores `raw` and then buffers it.
    pub fn assess<R: Rng>(
        &mut self,
        raw: &SignalVector,
        input: &SignalVector,
        history: &HistoryBuffer,
        rng: &mut R,
    ) -> AnomalyOutcome {
        match self {
            AnomalyDetector::Statistical(detector) => detector.score(input, history),
            AnomalyDetector::IsolationForest(forest) => {
                let score = forest.score(raw);
                forest.observe(*raw, rng);
                AnomalyOutcome::new(score)
            }
        }
    }

    pub fn status(&self) -> DetectorStatus {
        match self {
            AnomalyDetector::Statistical(_) => DetectorStatus {
                algorithm: DetectorKind::Statistical.as_str().to_string(),
                tree_count: 0,
                buffer_size: 0,
                phase: None,
                build_count: 0,
            },
            AnomalyDetector::IsolationForest(forest) => DetectorStatus {
                algorithm: DetectorKind::IsolationForest.as_str().to_string(),
                tree_count: forest.tree_count(),
                buffer_size: forest.buffer_len(),
                phase: Some(forest.phase()),
                build_count: forest.build_count(),
            },
        }
    }

    pub fn reset(&mut self) {
        if let AnomalyDetector::IsolationForest(forest) = self {
            forest.reset();
        }
    }
}
