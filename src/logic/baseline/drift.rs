//! Drift Tracker - EWMA running mean/variance per signal
//!
//! Slow adaptation by default. A reading further than `shock_sigmas` standard
//! deviations from the running mean is treated as a step change and blended
//! with the boosted factor for that update only. Readings are clamped to
//! `±READING_LIMIT` so the statistics stay finite.

use super::types::{DriftConfig, DriftSnapshot, DriftState};
use crate::logic::signals::{Signal, SignalVector, READING_LIMIT, SIGNAL_COUNT};

// ============================================================================
// DRIFT TRACKER
// ============================================================================

#[derive(Debug, Clone)]
pub struct DriftTracker {
    config: DriftConfig,
    states: [DriftState; SIGNAL_COUNT],
    shock_count: u64,
}

impl DriftTracker {
    pub fn new(config: DriftConfig) -> Self {
        let baselines = config.baselines();
        let states = [
            DriftState::seeded(baselines[0]),
            DriftState::seeded(baselines[1]),
            DriftState::seeded(baselines[2]),
        ];

        Self {
            config,
            states,
            shock_count: 0,
        }
    }

    /// Blend one reading into the running statistics, returns the smoothed value
    pub fn update(&mut self, signal: Signal, value: f32) -> f32 {
        let state = &mut self.states[signal.index()];
        if !value.is_finite() {
            return state.mean;
        }

        let value = value.clamp(-READING_LIMIT, READING_LIMIT);
        let deviation = value - state.mean;
        let is_shock = deviation.abs() > self.config.shock_sigmas * state.std();

        let alpha = if is_shock {
            self.shock_count += 1;
            self.config.shock_alpha()
        } else {
            self.config.base_alpha
        };

        let beta = self.config.variance_beta;

        state.mean += alpha * deviation;
        state.variance = (1.0 - beta) * state.variance + beta * deviation * deviation;
        state.updates += 1;

        state.mean
    }

    /// Update every signal of a sample, returns the smoothed vector
    pub fn update_all(&mut self, values: &SignalVector) -> SignalVector {
        let mut smoothed = [0.0f32; SIGNAL_COUNT];
        for signal in Signal::ALL {
            smoothed[signal.index()] = self.update(signal, values[signal.index()]);
        }
        smoothed
    }

    pub fn state(&self, signal: Signal) -> &DriftState {
        &self.states[signal.index()]
    }

    /// Current smoothed values in layout order
    pub fn smoothed(&self) -> SignalVector {
        [self.states[0].mean, self.states[1].mean, self.states[2].mean]
    }

    /// Number of updates that used the boosted factor
    pub fn shock_count(&self) -> u64 {
        self.shock_count
    }

    pub fn snapshot(&self) -> Vec<DriftSnapshot> {
        Signal::ALL
            .iter()
            .map(|&signal| {
                let state = self.state(signal);
                DriftSnapshot {
                    signal,
                    mean: state.mean,
                    std: state.std(),
                    updates: state.updates,
                }
            })
            .collect()
    }

    /// Back to the configured baseline
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }
}

impl Default for DriftTracker {
    fn default() -> Self {
        Self::new(DriftConfig::default())
    }
}
