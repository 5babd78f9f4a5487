//! Deterministic Health Estimator
//!
//! Closed-form penalty model over the three signals. Always available, never
//! fails, and doubles as the training target for the learned predictor.
//!
//! Two formulations:
//! - `Linear`: `penalty = max(0, (x - offset) * slope)`,
//!   `health = 100 - Σ w·penalty`
//! - `Sigmoid`: `penalty = σ(sensitivity * (x - soft_threshold))`,
//!   `health = (1 - Σ w·penalty) * 100`

use serde::{Deserialize, Serialize};

use crate::logic::model::activation::sigmoid;
use crate::logic::signals::{SignalVector, SIGNAL_COUNT};

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyModel {
    Linear,
    Sigmoid,
}

impl PenaltyModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PenaltyModel::Linear => "linear",
            PenaltyModel::Sigmoid => "sigmoid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearPenalty {
    pub offset: f32,
    pub slope: f32,
    pub weight: f32,
}

impl LinearPenalty {
    pub fn penalty(&self, value: f32) -> f32 {
        ((value - self.offset) * self.slope).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SigmoidPenalty {
    pub soft_threshold: f32,
    pub sensitivity: f32,
    pub weight: f32,
}

impl SigmoidPenalty {
    pub fn penalty(&self, value: f32) -> f32 {
        sigmoid(self.sensitivity * (value - self.soft_threshold))
    }
}

/// One entry per signal, in layout order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyTable<T> {
    pub temperature: T,
    pub vibration: T,
    pub current: T,
}

impl<T: Copy> PenaltyTable<T> {
    pub fn entries(&self) -> [T; SIGNAL_COUNT] {
        [self.temperature, self.vibration, self.current]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    pub model: PenaltyModel,
    pub linear: PenaltyTable<LinearPenalty>,
    pub sigmoid: PenaltyTable<SigmoidPenalty>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            model: PenaltyModel::Linear,
            linear: PenaltyTable {
                temperature: LinearPenalty { offset: 60.0, slope: 2.0, weight: 0.4 },
                vibration: LinearPenalty { offset: 1.0, slope: 20.0, weight: 0.35 },
                current: LinearPenalty { offset: 10.0, slope: 5.0, weight: 0.25 },
            },
            sigmoid: PenaltyTable {
                temperature: SigmoidPenalty { soft_threshold: 75.0, sensitivity: 0.15, weight: 0.3 },
                vibration: SigmoidPenalty { soft_threshold: 2.0, sensitivity: 3.0, weight: 0.4 },
                current: SigmoidPenalty { soft_threshold: 12.0, sensitivity: 0.8, weight: 0.3 },
            },
        }
    }
}

impl EstimatorConfig {
    /// Sum of the weights of the active formulation
    pub fn weight_sum(&self) -> f32 {
        match self.model {
            PenaltyModel::Linear => self.linear.entries().iter().map(|p| p.weight).sum(),
            PenaltyModel::Sigmoid => self.sigmoid.entries().iter().map(|p| p.weight).sum(),
        }
    }
}

// ============================================================================
// ESTIMATOR
// ============================================================================

#[derive(Debug, Clone)]
pub struct HealthEstimator {
    config: EstimatorConfig,
}

impl HealthEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn model(&self) -> PenaltyModel {
        self.config.model
    }

    /// Weighted penalty contributed by each signal, on a 0-100 health scale
    pub fn contributions(&self, values: &SignalVector) -> SignalVector {
        let mut out = [0.0f32; SIGNAL_COUNT];

        match self.config.model {
            PenaltyModel::Linear => {
                for (i, p) in self.config.linear.entries().iter().enumerate() {
                    out[i] = p.weight * p.penalty(values[i]);
                }
            }
            PenaltyModel::Sigmoid => {
                for (i, p) in self.config.sigmoid.entries().iter().enumerate() {
                    out[i] = p.weight * p.penalty(values[i]) * 100.0;
                }
            }
        }

        out
    }

    /// Health in [0, 100]
    pub fn estimate(&self, values: &SignalVector) -> f32 {
        let total: f32 = self.contributions(values).iter().sum();
        let health = 100.0 - total;

        if health.is_nan() {
            return 0.0;
        }
        health.clamp(0.0, 100.0)
    }
}

impl Default for HealthEstimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sigmoid_estimator() -> HealthEstimator {
        HealthEstimator::new(EstimatorConfig {
            model: PenaltyModel::Sigmoid,
            ..Default::default()
        })
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let mut config = EstimatorConfig::default();
        assert!((config.weight_sum() - 1.0).abs() < 1e-6);

        config.model = PenaltyModel::Sigmoid;
        assert!((config.weight_sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_linear_healthy_is_perfect() {
        let estimator = HealthEstimator::default();
        assert_eq!(estimator.estimate(&[40.0, 0.5, 5.0]), 100.0);
    }

    #[test]
    fn test_linear_temperature_penalty() {
        let estimator = HealthEstimator::default();
        // (90 - 60) * 2.0 * 0.4 = 24
        let health = estimator.estimate(&[90.0, 0.5, 5.0]);
        assert!((health - 76.0).abs() < 1e-4);
    }

    #[test]
    fn test_linear_clamped_at_zero() {
        let estimator = HealthEstimator::default();
        assert_eq!(estimator.estimate(&[300.0, 10.0, 60.0]), 0.0);
    }

    #[test]
    fn test_sigmoid_healthy_is_high() {
        let health = sigmoid_estimator().estimate(&[40.0, 0.5, 5.0]);
        assert!(health > 99.0 && health <= 100.0, "health {}", health);
    }

    #[test]
    fn test_sigmoid_overheating_below_warning() {
        let health = sigmoid_estimator().estimate(&[90.0, 0.5, 5.0]);
        assert!(health < 80.0, "health {}", health);
        // Temperature weight caps the drop at 30 points
        assert!(health > 69.0, "health {}", health);
    }

    #[test]
    fn test_monotonic_non_increasing_per_signal() {
        for estimator in [HealthEstimator::default(), sigmoid_estimator()] {
            let base = [40.0f32, 0.5, 5.0];
            let steps: [(f32, f32); 3] = [(1.0, 150.0), (0.05, 8.0), (0.25, 30.0)];

            for (i, (step, max)) in steps.iter().enumerate() {
                let mut values = base;
                let mut previous = estimator.estimate(&values);

                while values[i] < *max {
                    values[i] += step;
                    let health = estimator.estimate(&values);
                    assert!(
                        health <= previous + 1e-4,
                        "{:?}: signal {} at {} raised health {} -> {}",
                        estimator.model(), i, values[i], previous, health
                    );
                    previous = health;
                }
            }
        }
    }

    #[test]
    fn test_nan_input_never_panics() {
        let health = HealthEstimator::default().estimate(&[f32::NAN, 0.5, 5.0]);
        assert!((0.0..=100.0).contains(&health));
    }
}
