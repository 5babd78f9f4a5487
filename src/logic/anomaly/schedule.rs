//! Forest rebuild schedule
//!
//! The forest is rebuilt at discrete checkpoints instead of continuously.
//! Phase is a pure function of the build counters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForestPhase {
    /// No tree built yet, scores are neutral (0.5)
    Untrained,
    Built,
    /// `interval` samples arrived since the last build
    StalePendingRebuild,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebuildPolicy {
    /// Buffered samples required for the first build
    pub min_samples: usize,

    /// New samples between rebuilds
    pub interval: usize,
}

impl Default for RebuildPolicy {
    fn default() -> Self {
        Self {
            min_samples: 50,
            interval: 50,
        }
    }
}

impl RebuildPolicy {
    pub fn phase(&self, build_count: u64, samples_since_build: usize) -> ForestPhase {
        if build_count == 0 {
            ForestPhase::Untrained
        } else if samples_since_build >= self.interval {
            ForestPhase::StalePendingRebuild
        } else {
            ForestPhase::Built
        }
    }

    pub fn should_rebuild(&self, build_count: u64, buffer_len: usize, samples_since_build: usize) -> bool {
        match self.phase(build_count, samples_since_build) {
            ForestPhase::Untrained => buffer_len >= self.min_samples,
            ForestPhase::StalePendingRebuild => true,
            ForestPhase::Built => false,
        }
    }
}
