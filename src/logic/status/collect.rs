//! Status Collector - builds model and fleet snapshots

use crate::logic::engine::HealthModel;
use crate::logic::health::HealthStatus;
use crate::logic::model::ARCHITECTURE;
use crate::logic::signals::layout;

use super::types::{FleetStatus, ModelStatus};

pub fn collect(model: &HealthModel) -> ModelStatus {
    let config = model.config();
    let network = model.network();
    let stats = network.stats();

    let mode = if config.fusion.learned_is_authoritative(stats.confidence) {
        "Authoritative".to_string()
    } else {
        "Learning".to_string()
    };

    let last = model.last_result();

    ModelStatus {
        asset_id: model.asset_id().to_string(),
        signal_version: layout::SIGNAL_VERSION,
        layout_hash: layout::layout_hash(),
        architecture: ARCHITECTURE.to_string(),
        penalty_model: config.estimator.model,
        signal_source: config.signal_source,
        detector_kind: model.detector().kind(),
        mode,
        samples_processed: model.samples_processed(),
        training_count: stats.sample_count,
        confidence: stats.confidence,
        running_error: stats.running_error,
        history: network.history().status(),
        anomaly_count: model.anomaly_count(),
        last_health: last.map(|r| r.health),
        last_status: last.map(|r| r.status),
        drift: model.drift().snapshot(),
        drift_shocks: model.drift().shock_count(),
        detector: model.detector().status(),
    }
}

/// Sorted by asset id
pub fn collect_fleet(mut assets: Vec<ModelStatus>) -> FleetStatus {
    assets.sort_by(|a, b| a.asset_id.cmp(&b.asset_id));

    let count = |status: HealthStatus| assets.iter().filter(|a| a.last_status == Some(status)).count();

    FleetStatus {
        asset_count: assets.len(),
        healthy: count(HealthStatus::Healthy),
        warning: count(HealthStatus::Warning),
        critical: count(HealthStatus::Critical),
        unscored: assets.iter().filter(|a| a.last_status.is_none()).count(),
        total_samples: assets.iter().map(|a| a.samples_processed).sum(),
        total_anomalies: assets.iter().map(|a| a.anomaly_count).sum(),
        assets,
    }
}
