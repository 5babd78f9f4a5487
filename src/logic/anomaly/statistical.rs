//! Statistical Detector - z-score against recent history
//!
//! `score = min(1, max_z / z_scale)` where `max_z` is the largest per-signal
//! z-score of the current vector against the history buffer.

use serde::{Deserialize, Serialize};

use super::types::AnomalyOutcome;
use crate::logic::model::HistoryBuffer;
use crate::logic::signals::{Signal, SignalVector};

/// Guards against division by zero on flat history
pub const STD_FLOOR: f32 = 1e-6;

pub const REASON_INSUFFICIENT_DATA: &str = "insufficient data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalConfig {
    /// Entries required before any score is produced
    pub min_history: usize,

    /// z-score mapped to a score of 1.0
    pub z_scale: f32,

    /// z-score above which the dominating signal is reported
    pub spike_z: f32,
}

impl Default for StatisticalConfig {
    fn default() -> Self {
        Self {
            min_history: 10,
            z_scale: 4.0,
            spike_z: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatisticalDetector {
    config: StatisticalConfig,
}

impl StatisticalDetector {
    pub fn new(config: StatisticalConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, values: &SignalVector, history: &HistoryBuffer) -> AnomalyOutcome {
        if history.len() < self.config.min_history {
            return AnomalyOutcome::with_reason(0.0, REASON_INSUFFICIENT_DATA);
        }

        let mut max_z = 0.0f32;
        let mut dominant = Signal::Temperature;

        for signal in Signal::ALL {
            let (mean, std) = mean_std(history.values(signal));
            let z = (values[signal.index()] - mean).abs() / std.max(STD_FLOOR);

            if z > max_z {
                max_z = z;
                dominant = signal;
            }
        }

        let score = (max_z / self.config.z_scale).min(1.0);

        if max_z > self.config.spike_z {
            AnomalyOutcome::with_reason(score, spike_reason(dominant))
        } else {
            AnomalyOutcome::new(score)
        }
    }
}

fn spike_reason(signal: Signal) -> &'static str {
    match signal {
        Signal::Temperature => "temperature spike",
        Signal::Vibration => "vibration spike",
        Signal::Current => "current spike",
    }
}

/// Population mean and standard deviation
fn mean_std(values: impl Iterator<Item = f32> + Clone) -> (f32, f32) {
    let n = values.clone().count();
    if n == 0 {
        return (0.0, 0.0);
    }

    let mean = values.clone().sum::<f32>() / n as f32;
    let variance = values.map(|v| (v - mean).powi(2)).sum::<f32>() / n as f32;
    (mean, variance.sqrt())
}
