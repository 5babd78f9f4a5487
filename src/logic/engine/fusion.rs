//! Fusion Gate - one asset's model
//!
//! `HealthModel` owns every piece of per-asset state and turns one sample
//! into one `PredictionResult`:
//! 1. Drift tracker update (always)
//! 2. Deterministic health on the selected signal vector
//! 3. Learned health, authoritative only above the confidence gate
//! 4. Anomaly score from the configured detector
//! 5. Fault label, status band and RUL
//! 6. One training step towards the deterministic health

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::types::{PredictionResult, PredictionSource};
use crate::logic::anomaly::{AnomalyDetector, DetectorKind};
use crate::logic::baseline::DriftTracker;
use crate::logic::config::{EngineConfig, SignalSource};
use crate::logic::fault::FaultClassifier;
use crate::logic::health::{HealthEstimator, RulEstimator};
use crate::logic::model::HealthNetwork;
use crate::logic::signals::Sample;
use crate::logic::status::{self, ModelStatus};

const REASON_LEARNED: &str = "learned anomaly pattern";
const REASON_ISOLATED: &str = "isolated outlier";

pub struct HealthModel {
    asset_id: String,
    config: EngineConfig,
    drift: DriftTracker,
    estimator: HealthEstimator,
    network: HealthNetwork,
    detector: AnomalyDetector,
    classifier: FaultClassifier,
    rul: RulEstimator,
    rng: StdRng,
    samples_processed: u64,
    anomaly_count: u64,
    last_result: Option<PredictionResult>,
}

impl HealthModel {
    /// Seeded from `config.seed` when set, otherwise from OS entropy
    pub fn new(asset_id: &str, config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(asset_id, config, rng)
    }

    pub fn with_rng(asset_id: &str, config: EngineConfig, mut rng: StdRng) -> Self {
        let network = HealthNetwork::new(config.network.clone(), config.normalization.clone(), &mut rng);
        let detector = AnomalyDetector::new(config.detector, &config.statistical, &config.forest);

        log::info!(
            "Health model created for '{}': {} estimator, {} detector, {:?} signals",
            asset_id,
            config.estimator.model.as_str(),
            config.detector,
            config.signal_source
        );

        Self {
            asset_id: asset_id.to_string(),
            drift: DriftTracker::new(config.drift.clone()),
            estimator: HealthEstimator::new(config.estimator.clone()),
            network,
            detector,
            classifier: FaultClassifier::new(config.faults.clone()),
            rul: RulEstimator::new(config.rul.clone(), config.bands),
            rng,
            samples_processed: 0,
            anomaly_count: 0,
            last_result: None,
            config,
        }
    }

    // ========================================================================
    // PROCESSING
    // ========================================================================

    pub fn process(&mut self, sample: &Sample) -> PredictionResult {
        let raw = sample.values();
        let smoothed = self.drift.update_all(&raw);
        let input = match self.config.signal_source {
            SignalSource::Raw => raw,
            SignalSource::Smoothed => smoothed,
        };

        let deterministic = self.estimator.estimate(&input);
        let learned = self.network.forward(&input);
        let confidence = self.network.confidence();

        // Anomaly
        let outcome = self.detector.assess(&raw, &input, self.network.history(), &mut self.rng);
        let threshold = self.detector.threshold(&self.config.fusion);

        let (anomaly_score, mut reason) = match self.detector.kind() {
            DetectorKind::Statistical => {
                if learned.anomaly > outcome.score {
                    (learned.anomaly, None)
                } else {
                    (outcome.score, outcome.reason)
                }
            }
            DetectorKind::IsolationForest => (outcome.score, outcome.reason),
        };
        let anomaly_score = anomaly_score.clamp(0.0, 1.0);
        let is_anomaly = anomaly_score > threshold;

        if is_anomaly && reason.is_none() {
            reason = Some(match self.detector.kind() {
                DetectorKind::Statistical => REASON_LEARNED,
                DetectorKind::IsolationForest => REASON_ISOLATED,
            });
        }

        // Health source
        let source = if self.config.fusion.learned_is_authoritative(confidence) {
            PredictionSource::Learned
        } else {
            PredictionSource::Deterministic
        };
        let health = match source {
            PredictionSource::Learned => learned.health_percent(),
            PredictionSource::Deterministic => deterministic,
        };

        if let Some(previous) = &self.last_result {
            if previous.prediction_source != source {
                log::debug!(
                    "[{}] prediction source {} -> {} at confidence {:.3}",
                    self.asset_id, previous.prediction_source, source, confidence
                );
            }
        }

        let reported_confidence = match self.detector.kind() {
            DetectorKind::IsolationForest if is_anomaly => {
                let net = &self.config.network;
                (confidence * (1.0 - self.config.fusion.outlier_confidence_penalty * anomaly_score))
                    .max(net.confidence_floor)
                    .min(net.confidence_ceiling)
            }
            _ => confidence,
        };

        // Training never stops
        self.network.train(&input, deterministic);

        self.samples_processed += 1;
        if is_anomaly {
            self.anomaly_count += 1;
        }

        let result = PredictionResult {
            health,
            status: self.config.bands.status(health),
            fault: self.classifier.classify(&raw),
            rul: self.rul.estimate(health),
            anomaly_score,
            is_anomaly,
            confidence: reported_confidence,
            prediction_source: source,
            training_count: self.network.stats().sample_count,
            deterministic_health: deterministic,
            learned_health: learned.health_percent(),
            anomaly_reason: reason.map(str::to_string),
        };

        self.last_result = Some(result.clone());
        result
    }

    /// Fresh weights, drift state and detector; configuration kept
    pub fn reset(&mut self) {
        self.drift.reset();
        self.network.reset(&mut self.rng);
        self.detector.reset();
        self.samples_processed = 0;
        self.anomaly_count = 0;
        self.last_result = None;

        log::info!("Health model for '{}' reset", self.asset_id);
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn status(&self) -> ModelStatus {
        status::collect(self)
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn drift(&self) -> &DriftTracker {
        &self.drift
    }

    pub fn network(&self) -> &HealthNetwork {
        &self.network
    }

    pub fn detector(&self) -> &AnomalyDetector {
        &self.detector
    }

    pub fn samples_processed(&self) -> u64 {
        self.samples_processed
    }

    pub fn anomaly_count(&self) -> u64 {
        self.anomaly_count
    }

    pub fn last_result(&self) -> Option<&PredictionResult> {
        self.last_result.as_ref()
    }
}
