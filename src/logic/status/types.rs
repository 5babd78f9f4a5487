//! Status Types - model and fleet diagnostics

use serde::{Deserialize, Serialize};

use crate::logic::anomaly::{DetectorKind, DetectorStatus};
use crate::logic::baseline::DriftSnapshot;
use crate::logic::config::SignalSource;
use crate::logic::health::{HealthStatus, PenaltyModel};
use crate::logic::model::BufferStatus;

/// Diagnostics of one asset model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub asset_id: String,
    pub signal_version: u8,
    pub layout_hash: u32,
    pub architecture: String,
    pub penalty_model: PenaltyModel,
    pub signal_source: SignalSource,
    pub detector_kind: DetectorKind,
    pub mode: String, // Learning, Authoritative

    pub samples_processed: u64,
    pub training_count: u64,
    pub confidence: f32,
    pub running_error: f32,
    pub history: BufferStatus,
    pub anomaly_count: u64,

    pub last_health: Option<f32>,
    pub last_status: Option<HealthStatus>,

    pub drift: Vec<DriftSnapshot>,
    pub drift_shocks: u64,
    pub detector: DetectorStatus,
}

/// Summary across every registered asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetStatus {
    pub asset_count: usize,
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
    /// Registered but no sample processed yet
    pub unscored: usize,
    pub total_samples: u64,
    pub total_anomalies: u64,
    pub assets: Vec<ModelStatus>,
}
