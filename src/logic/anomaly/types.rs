//! Anomaly Types - Shared detector contract types

use serde::{Deserialize, Serialize};

use super::schedule::ForestPhase;

/// Which scorer backs the anomaly signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    /// Z-score against the training history, paired with the network's anomaly output
    Statistical,
    /// Isolation forest over raw samples
    IsolationForest,
}

impl DetectorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorKind::Statistical => "statistical",
            DetectorKind::IsolationForest => "isolation_forest",
        }
    }

    pub fn parse(value: &str) -> Option<DetectorKind> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "statistical" | "zscore" | "z_score" => Some(DetectorKind::Statistical),
            "isolation_forest" | "forest" | "iforest" => Some(DetectorKind::IsolationForest),
            _ => None,
        }
    }
}

impl std::fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score in [0, 1] plus an optional human-readable cause
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyOutcome {
    pub score: f32,
    pub reason: Option<&'static str>,
}

impl AnomalyOutcome {
    pub fn new(score: f32) -> Self {
        Self { score, reason: None }
    }

    pub fn with_reason(score: f32, reason: &'static str) -> Self {
        Self {
            score,
            reason: Some(reason),
        }
    }
}

/// Detector diagnostics for status snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorStatus {
    pub algorithm: String,
    pub tree_count: usize,
    pub buffer_size: usize,
    pub phase: Option<ForestPhase>,
    pub build_count: u64,
}
