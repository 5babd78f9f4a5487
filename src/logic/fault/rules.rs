//! Fault Rules & Thresholds
//!
//! Warning/critical levels per signal. Comparisons are strict (`>`).

use serde::{Deserialize, Serialize};

use crate::logic::signals::{Signal, SignalVector};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    pub warning: f32,
    pub critical: f32,
}

impl SignalThresholds {
    pub fn is_warning(&self, value: f32) -> bool {
        value > self.warning
    }

    pub fn is_critical(&self, value: f32) -> bool {
        value > self.critical
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultThresholds {
    pub temperature: SignalThresholds,
    pub vibration: SignalThresholds,
    pub current: SignalThresholds,
}

impl Default for FaultThresholds {
    fn default() -> Self {
        Self {
            temperature: SignalThresholds { warning: 70.0, critical: 85.0 },
            vibration: SignalThresholds { warning: 1.5, critical: 2.5 },
            current: SignalThresholds { warning: 12.0, critical: 15.0 },
        }
    }
}

impl FaultThresholds {
    pub fn get(&self, signal: Signal) -> &SignalThresholds {
        match signal {
            Signal::Temperature => &self.temperature,
            Signal::Vibration => &self.vibration,
            Signal::Current => &self.current,
        }
    }

    /// Evaluate every predicate once for a sample
    pub fn levels(&self, values: &SignalVector) -> SignalLevels {
        let warning = |s: Signal| self.get(s).is_warning(values[s.index()]);
        let critical = |s: Signal| self.get(s).is_critical(values[s.index()]);

        SignalLevels {
            temp_warning: warning(Signal::Temperature),
            temp_critical: critical(Signal::Temperature),
            vib_warning: warning(Signal::Vibration),
            vib_critical: critical(Signal::Vibration),
            current_warning: warning(Signal::Current),
            current_critical: critical(Signal::Current),
        }
    }
}

/// Predicate results for one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignalLevels {
    pub temp_warning: bool,
    pub temp_critical: bool,
    pub vib_warning: bool,
    pub vib_critical: bool,
    pub current_warning: bool,
    pub current_critical: bool,
}
