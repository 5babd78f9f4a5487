//! Drift Types - config, per-signal state and snapshot

use serde::{Deserialize, Serialize};

use crate::logic::signals::{Signal, SIGNAL_COUNT};

// ============================================================================
// DRIFT CONFIG
// ============================================================================

/// Starting point of one signal's running statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalBaseline {
    pub mean: f32,
    pub variance: f32,
}

impl SignalBaseline {
    pub const fn new(mean: f32, variance: f32) -> Self {
        Self { mean, variance }
    }
}

/// EWMA drift tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Base smoothing factor for the mean (slow adaptation)
    pub base_alpha: f32,

    /// Multiplier applied to `base_alpha` on a shock update (result capped at 1)
    pub shock_multiplier: f32,

    /// Deviation, in standard deviations, that counts as a shock
    pub shock_sigmas: f32,

    /// Smoothing factor for the variance, smaller than `base_alpha`
    pub variance_beta: f32,

    pub temperature: SignalBaseline,
    pub vibration: SignalBaseline,
    pub current: SignalBaseline,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            base_alpha: 0.1,
            shock_multiplier: 5.0,
            shock_sigmas: 3.0,
            variance_beta: 0.01,
            temperature: SignalBaseline::new(40.0, 4.0),
            vibration: SignalBaseline::new(0.5, 0.01),
            current: SignalBaseline::new(5.0, 1.0),
        }
    }
}

impl DriftConfig {
    pub fn baselines(&self) -> [SignalBaseline; SIGNAL_COUNT] {
        [self.temperature, self.vibration, self.current]
    }

    /// Smoothing factor used when a shock is detected
    pub fn shock_alpha(&self) -> f32 {
        (self.base_alpha * self.shock_multiplier).min(1.0)
    }
}

// ============================================================================
// DRIFT STATE
// ============================================================================

/// Running EWMA statistics of one signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftState {
    pub mean: f32,
    pub variance: f32,
    pub updates: u64,
}

impl DriftState {
    pub fn seeded(baseline: SignalBaseline) -> Self {
        Self {
            mean: baseline.mean,
            variance: baseline.variance.max(0.0),
            updates: 0,
        }
    }

    pub fn std(&self) -> f32 {
        self.variance.max(0.0).sqrt()
    }
}

/// Read-only view for diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftSnapshot {
    pub signal: Signal,
    pub mean: f32,
    pub std: f32,
    pub updates: u64,
}
