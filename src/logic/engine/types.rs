//! Engine Types
//!
//! Output contract of the engine. No logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::fault::FaultClass;
use crate::logic::health::HealthStatus;

// ============================================================================
// PREDICTION SOURCE
// ============================================================================

/// Which estimator produced the reported health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    Learned,
    Deterministic,
}

impl PredictionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionSource::Learned => "learned",
            PredictionSource::Deterministic => "deterministic",
        }
    }
}

impl std::fmt::Display for PredictionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PREDICTION RESULT
// ============================================================================

/// Result of processing one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// 0-100
    pub health: f32,
    pub status: HealthStatus,
    pub fault: FaultClass,
    /// Remaining useful life (hours)
    pub rul: u32,
    /// 0-1
    pub anomaly_score: f32,
    pub is_anomaly: bool,
    pub confidence: f32,
    pub prediction_source: PredictionSource,
    /// Training steps taken, including this sample
    pub training_count: u64,

    // Diagnostics
    pub deterministic_health: f32,
    pub learned_health: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly_reason: Option<String>,
}

/// Output record emitted per ingested sample
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub id: String,
    pub asset_id: String,
    pub processed_at: DateTime<Utc>,
    /// Sample timestamp (ms since epoch) when the payload carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_timestamp: Option<i64>,
    pub result: PredictionResult,
}

impl PredictionRecord {
    pub fn new(asset_id: &str, sample_timestamp: Option<i64>, result: PredictionResult) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            asset_id: asset_id.to_string(),
            processed_at: Utc::now(),
            sample_timestamp,
            result,
        }
    }
}
