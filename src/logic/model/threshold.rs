//! Fusion thresholds
//!
//! Confidence gate for the learned predictor and the anomaly cut-offs of the
//! two detector pairings. The cut-offs are independent: the statistical
//! pairing takes the max of two scores while the forest score stands alone.

use serde::{Deserialize, Serialize};

/// Anomaly cut-off when pairing the network with the z-score detector
pub const STATISTICAL_ANOMALY_THRESHOLD: f32 = 0.5;

/// Anomaly cut-off for the isolation-forest score
pub const FOREST_ANOMALY_THRESHOLD: f32 = 0.55;

/// Learned health is used only above this confidence
pub const CONFIDENCE_GATE: f32 = 0.88;

/// Fraction of the outlier score taken off the reported confidence
pub const OUTLIER_CONFIDENCE_PENALTY: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionConfig {
    pub confidence_gate: f32,
    pub statistical_threshold: f32,
    pub forest_threshold: f32,
    pub outlier_confidence_penalty: f32,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            confidence_gate: CONFIDENCE_GATE,
            statistical_threshold: STATISTICAL_ANOMALY_THRESHOLD,
            forest_threshold: FOREST_ANOMALY_THRESHOLD,
            outlier_confidence_penalty: OUTLIER_CONFIDENCE_PENALTY,
        }
    }
}

impl FusionConfig {
    /// Lower anomaly cut-offs
    pub fn high_sensitivity() -> Self {
        Self {
            statistical_threshold: 0.4,
            forest_threshold: 0.5,
            ..Default::default()
        }
    }

    /// Higher anomaly cut-offs
    pub fn low_sensitivity() -> Self {
        Self {
            statistical_threshold: 0.7,
            forest_threshold: 0.65,
            ..Default::default()
        }
    }

    /// `high` / `normal` / `low`
    pub fn sensitivity(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::high_sensitivity()),
            "normal" | "default" => Some(Self::default()),
            "low" => Some(Self::low_sensitivity()),
            _ => None,
        }
    }

    /// Strictly above the gate
    pub fn learned_is_authoritative(&self, confidence: f32) -> bool {
        confidence > self.confidence_gate
    }
}
