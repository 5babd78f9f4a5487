//! Remaining Useful Life Estimator
//!
//! `rul = max_hours * (health / 100)^2`, then reduced by a multiplier once
//! health enters the warning or critical band. Decay concentrates at low
//! health and barely touches near-perfect health.

use serde::{Deserialize, Serialize};

use super::status::HealthBands;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulConfig {
    /// RUL of a perfectly healthy asset (hours)
    pub max_hours: f32,

    /// Applied below the warning band
    pub warning_multiplier: f32,

    /// Applied below the critical band (instead of the warning multiplier)
    pub critical_multiplier: f32,
}

impl Default for RulConfig {
    fn default() -> Self {
        Self {
            max_hours: 1000.0,
            warning_multiplier: 0.75,
            critical_multiplier: 0.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RulEstimator {
    config: RulConfig,
    bands: HealthBands,
}

impl RulEstimator {
    pub fn new(config: RulConfig, bands: HealthBands) -> Self {
        Self { config, bands }
    }

    /// Remaining hours for a health percentage, rounded, never negative
    pub fn estimate(&self, health_percent: f32) -> u32 {
        let health = (health_percent / 100.0).clamp(0.0, 1.0);
        let mut rul = self.config.max_hours * health * health;

        if health_percent < self.bands.critical {
            rul *= self.config.critical_multiplier;
        } else if health_percent < self.bands.warning {
            rul *= self.config.warning_multiplier;
        }

        if !rul.is_finite() {
            return 0;
        }
        rul.max(0.0).round() as u32
    }
}

impl Default for RulEstimator {
    fn default() -> Self {
        Self::new(RulConfig::default(), HealthBands::default())
    }
}
