//! Fault Classifier
//!
//! Ordered pattern table, first match wins. Combined patterns come first, so
//! the single-signal patterns further down only fire when no combination
//! matched.

use super::rules::{FaultThresholds, SignalLevels};
use super::types::FaultClass;
use crate::logic::signals::SignalVector;

type Pattern = (FaultClass, fn(&SignalLevels) -> bool);

/// Precedence order
const PATTERNS: &[Pattern] = &[
    (FaultClass::BearingWear, bearing_wear),
    (FaultClass::Overload, overload),
    (FaultClass::Misalignment, misalignment),
    (FaultClass::Overheating, overheating),
    (FaultClass::ElectricalIssue, electrical_issue),
];

fn bearing_wear(l: &SignalLevels) -> bool {
    l.temp_warning && l.vib_warning
}

fn overload(l: &SignalLevels) -> bool {
    l.temp_warning && l.current_warning
}

fn misalignment(l: &SignalLevels) -> bool {
    l.vib_critical
}

fn overheating(l: &SignalLevels) -> bool {
    l.temp_critical
}

fn electrical_issue(l: &SignalLevels) -> bool {
    l.current_critical
}

#[derive(Debug, Clone, Default)]
pub struct FaultClassifier {
    thresholds: FaultThresholds,
}

impl FaultClassifier {
    pub fn new(thresholds: FaultThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &FaultThresholds {
        &self.thresholds
    }

    pub fn classify(&self, values: &SignalVector) -> FaultClass {
        let levels = self.thresholds.levels(values);

        PATTERNS
            .iter()
            .find(|(_, matches)| matches(&levels))
            .map(|(class, _)| *class)
            .unwrap_or(FaultClass::None)
    }
}
