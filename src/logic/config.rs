//! Engine Configuration
//!
//! Every tunable of one asset model, fixed at construction. Loadable from a
//! JSON file, overridable from the environment, validated before use.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::logic::anomaly::{DetectorKind, ForestConfig, StatisticalConfig};
use crate::logic::baseline::DriftConfig;
use crate::logic::fault::{FaultThresholds, SignalThresholds};
use crate::logic::health::{EstimatorConfig, HealthBands, PenaltyModel, RulConfig};
use crate::logic::model::{FusionConfig, NetworkConfig};
use crate::logic::signals::layout::{layout_hash, SIGNAL_VERSION};
use crate::logic::signals::{NormalizationConfig, Signal};

const WEIGHT_TOLERANCE: f32 = 1e-3;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
    LayoutMismatch {
        expected_version: u8,
        expected_hash: u32,
        actual_version: u8,
        actual_hash: u32,
    },
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO Error: {}", e),
            ConfigError::SerializationError(e) => write!(f, "Serialization Error: {}", e),
            ConfigError::LayoutMismatch { expected_version, expected_hash, actual_version, actual_hash } => {
                write!(f, "Signal Layout Mismatch: Expected v{} ({:x}), Got v{} ({:x})",
                    expected_version, expected_hash, actual_version, actual_hash)
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid Config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::SerializationError(err)
    }
}

// ============================================================================
// TYPES
// ============================================================================

/// Which vector feeds the estimator, the network and the history buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    /// Sample as received
    Raw,
    /// Drift tracker output
    Smoothed,
}

/// Signal layout a config file was written against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStamp {
    pub version: u8,
    pub hash: u32,
}

impl Default for LayoutStamp {
    fn default() -> Self {
        Self {
            version: SIGNAL_VERSION,
            hash: layout_hash(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: LayoutStamp,
    pub signal_source: SignalSource,
    pub detector: DetectorKind,
    pub normalization: NormalizationConfig,
    pub drift: DriftConfig,
    pub estimator: EstimatorConfig,
    pub network: NetworkConfig,
    pub statistical: StatisticalConfig,
    pub forest: ForestConfig,
    pub fusion: FusionConfig,
    pub faults: FaultThresholds,
    pub bands: HealthBands,
    pub rul: RulConfig,

    /// Fixed seed for weight init and forest sampling; entropy when unset
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::teacher_student()
    }
}

// ============================================================================
// PRESETS
// ============================================================================

impl EngineConfig {
    /// Linear penalties on raw signals, network paired with z-scores
    pub fn teacher_student() -> Self {
        Self {
            layout: LayoutStamp::default(),
            signal_source: SignalSource::Raw,
            detector: DetectorKind::Statistical,
            normalization: NormalizationConfig::default(),
            drift: DriftConfig::default(),
            estimator: EstimatorConfig::default(),
            network: NetworkConfig::default(),
            statistical: StatisticalConfig::default(),
            forest: ForestConfig::default(),
            fusion: FusionConfig::default(),
            faults: FaultThresholds::default(),
            bands: HealthBands::default(),
            rul: RulConfig::default(),
            seed: None,
        }
    }

    /// Sigmoid penalties on drift-smoothed signals, isolation forest on raw samples
    pub fn isolation_forest() -> Self {
        Self {
            signal_source: SignalSource::Smoothed,
            detector: DetectorKind::IsolationForest,
            estimator: EstimatorConfig {
                model: PenaltyModel::Sigmoid,
                ..Default::default()
            },
            ..Self::teacher_student()
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "teacher_student" | "default" => Some(Self::teacher_student()),
            "isolation_forest" | "forest" => Some(Self::isolation_forest()),
            _ => None,
        }
    }

    /// Swap the anomaly cut-offs for a sensitivity level, keeping the gate
    pub fn apply_sensitivity(&mut self, name: &str) -> bool {
        match FusionConfig::sensitivity(name) {
            Some(fusion) => {
                self.fusion = FusionConfig {
                    confidence_gate: self.fusion.confidence_gate,
                    outlier_confidence_penalty: self.fusion.outlier_confidence_penalty,
                    ..fusion
                };
                true
            }
            None => false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

// ============================================================================
// LOAD / SAVE
// ============================================================================

impl EngineConfig {
    /// Load and validate a JSON config; missing fields take defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read(path)?;
        let config: EngineConfig = serde_json::from_slice(&data)?;
        config.validate()?;

        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Config for the running process: file at `ASSETSENSE_CONFIG` (or the
    /// default path) when present, else the `ASSETSENSE_PRESET` preset, then
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = constants::get_config_path();

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            match constants::get_preset() {
                Some(name) => Self::preset(&name).unwrap_or_else(|| {
                    log::warn!("Unknown preset '{}', using teacher_student", name);
                    Self::teacher_student()
                }),
                None => Self::default(),
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(value) = constants::get_detector_override() {
            match DetectorKind::parse(&value) {
                Some(kind) => self.detector = kind,
                None => log::warn!("Ignoring unknown detector '{}'", value),
            }
        }
        if let Some(value) = constants::get_sensitivity_override() {
            if !self.apply_sensitivity(&value) {
                log::warn!("Ignoring unknown sensitivity '{}'", value);
            }
        }
        if let Some(seed) = constants::get_seed_override() {
            self.seed = Some(seed);
        }
        if let Some(rate) = constants::get_learning_rate_override() {
            self.network.learning_rate = rate;
        }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let expected = LayoutStamp::default();
        if self.layout != expected {
            return Err(ConfigError::LayoutMismatch {
                expected_version: expected.version,
                expected_hash: expected.hash,
                actual_version: self.layout.version,
                actual_hash: self.layout.hash,
            });
        }

        for model in [PenaltyModel::Linear, PenaltyModel::Sigmoid] {
            let sum = EstimatorConfig { model, ..self.estimator.clone() }.weight_sum();
            if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
                return invalid(format!("{} penalty weights sum to {}, expected 1", model.as_str(), sum));
            }
        }

        for (signal, bounds) in Signal::ALL.iter().zip(self.normalization.bounds()) {
            if !(bounds.max > bounds.min) {
                return invalid(format!("{} normalization bounds are not ordered", signal));
            }
        }

        for signal in Signal::ALL {
            let SignalThresholds { warning, critical } = *self.faults.get(signal);
            if !(critical > warning) {
                return invalid(format!("{} critical threshold must exceed warning", signal));
            }
        }

        if !(self.bands.warning > self.bands.critical && self.bands.critical > 0.0 && self.bands.warning <= 100.0) {
            return invalid("health bands must satisfy 0 < critical < warning <= 100".to_string());
        }

        let d = &self.drift;
        if !(d.base_alpha > 0.0 && d.base_alpha <= 1.0) || !(d.variance_beta > 0.0 && d.variance_beta <= 1.0) {
            return invalid("drift smoothing factors must be in (0, 1]".to_string());
        }
        if !(d.shock_multiplier >= 1.0) || !(d.shock_sigmas > 0.0) {
            return invalid("drift shock multiplier must be >= 1 and shock sigmas > 0".to_string());
        }

        let n = &self.network;
        if !(n.learning_rate > 0.0 && n.learning_rate.is_finite()) {
            return invalid(format!("learning rate {} must be positive", n.learning_rate));
        }
        if !(n.confidence_floor <= n.confidence_ceiling) || !(0.0..1.0).contains(&n.error_decay) {
            return invalid("confidence floor must not exceed ceiling and error decay must be in [0, 1)".to_string());
        }
        if n.history_capacity == 0 {
            return invalid("history capacity must be positive".to_string());
        }

        let f = &self.forest;
        if f.tree_count == 0 || f.sample_size < 2 || f.rebuild.interval == 0 || f.rebuild.min_samples == 0 {
            return invalid("forest needs trees, sample size >= 2 and positive rebuild counts".to_string());
        }
        if f.rebuild.min_samples > f.buffer_capacity() {
            return invalid(format!(
                "forest min_samples {} exceeds its buffer capacity {}",
                f.rebuild.min_samples,
                f.buffer_capacity()
            ));
        }

        if self.statistical.min_history < 2 || !(self.statistical.z_scale > 0.0) {
            return invalid("statistical detector needs min_history >= 2 and z_scale > 0".to_string());
        }
        if self.statistical.min_history > n.history_capacity {
            return invalid(format!(
                "statistical min_history {} exceeds history capacity {}",
                self.statistical.min_history, n.history_capacity
            ));
        }

        let fu = &self.fusion;
        for (name, value) in [
            ("confidence_gate", fu.confidence_gate),
            ("statistical_threshold", fu.statistical_threshold),
            ("forest_threshold", fu.forest_threshold),
            ("outlier_confidence_penalty", fu.outlier_confidence_penalty),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return invalid(format!("{} = {} is outside [0, 1]", name, value));
            }
        }

        if !(self.rul.max_hours >= 0.0) {
            return invalid("RUL max hours must be non-negative".to_string());
        }

        Ok(())
    }
}

fn invalid(msg: String) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid(msg))
}
