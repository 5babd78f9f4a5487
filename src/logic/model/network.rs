//! Learned Health Predictor
//!
//! Fixed 3 → 4 (ReLU) → 2 (sigmoid) feed-forward network trained online by
//! SGD. Output 0 is health (0-1), output 1 is an anomaly probability. The
//! training label is the deterministic estimator's health and an anomaly
//! target of 0, so the network learns what "normal" looks like for the asset.

use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::activation::{relu, relu_derivative, sigmoid, sigmoid_derivative};
use super::buffer::{HistoryBuffer, HistoryEntry, HISTORY_CAPACITY};
use crate::logic::signals::{NormalizationConfig, SignalVector, SIGNAL_COUNT};

pub const INPUT_SIZE: usize = SIGNAL_COUNT;
pub const HIDDEN_SIZE: usize = 4;
pub const OUTPUT_SIZE: usize = 2;

pub const ARCHITECTURE: &str = "3→4→2";

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub learning_rate: f32,

    /// Confidence of an untrained network
    pub confidence_floor: f32,

    /// Confidence gained per unit of (1 - running error)
    pub confidence_scale: f32,

    pub confidence_ceiling: f32,

    /// Weight of the previous running error
    pub error_decay: f32,

    pub history_capacity: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            confidence_floor: 0.5,
            confidence_scale: 0.4,
            confidence_ceiling: 0.99,
            error_decay: 0.95,
            history_capacity: HISTORY_CAPACITY,
        }
    }
}

// ============================================================================
// STATE
// ============================================================================

/// Weights and biases, mutated only by `HealthNetwork::train`
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkState {
    pub w_input_hidden: Array2<f32>,
    pub w_hidden_output: Array2<f32>,
    pub b_hidden: Array1<f32>,
    pub b_output: Array1<f32>,
}

impl NetworkState {
    /// Xavier-uniform weights, zero biases
    pub fn xavier<R: Rng>(rng: &mut R) -> Self {
        Self {
            w_input_hidden: xavier_matrix(rng, INPUT_SIZE, HIDDEN_SIZE),
            w_hidden_output: xavier_matrix(rng, HIDDEN_SIZE, OUTPUT_SIZE),
            b_hidden: Array1::zeros(HIDDEN_SIZE),
            b_output: Array1::zeros(OUTPUT_SIZE),
        }
    }
}

fn xavier_matrix<R: Rng>(rng: &mut R, fan_in: usize, fan_out: usize) -> Array2<f32> {
    let limit = (6.0 / (fan_in + fan_out) as f32).sqrt();
    Array2::from_shape_fn((fan_in, fan_out), |_| rng.gen_range(-limit..limit))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingStats {
    pub sample_count: u64,
    pub running_error: f32,
    pub confidence: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkOutput {
    /// 0-1
    pub health: f32,
    pub anomaly: f32,
}

impl NetworkOutput {
    pub fn health_percent(&self) -> f32 {
        (self.health * 100.0).clamp(0.0, 100.0)
    }
}

/// Pre- and post-activation values kept for backpropagation
struct ForwardPass {
    input: Array1<f32>,
    hidden_pre: Array1<f32>,
    hidden: Array1<f32>,
    output_pre: Array1<f32>,
    output: Array1<f32>,
}

// ============================================================================
// NETWORK
// ============================================================================

#[derive(Debug, Clone)]
pub struct HealthNetwork {
    config: NetworkConfig,
    normalization: NormalizationConfig,
    state: NetworkState,
    stats: TrainingStats,
    history: HistoryBuffer,
}

impl HealthNetwork {
    pub fn new<R: Rng>(
        config: NetworkConfig,
        normalization: NormalizationConfig,
        rng: &mut R,
    ) -> Self {
        let stats = TrainingStats {
            sample_count: 0,
            running_error: 1.0,
            confidence: config.confidence_floor,
        };
        let history = HistoryBuffer::new(config.history_capacity);

        Self {
            state: NetworkState::xavier(rng),
            config,
            normalization,
            stats,
            history,
        }
    }

    pub fn state(&self) -> &NetworkState {
        &self.state
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    pub fn confidence(&self) -> f32 {
        self.stats.confidence
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Forward pass on raw signal values
    pub fn forward(&self, values: &SignalVector) -> NetworkOutput {
        let pass = self.forward_pass(values);
        NetworkOutput {
            health: pass.output[0],
            anomaly: pass.output[1],
        }
    }

    fn forward_pass(&self, values: &SignalVector) -> ForwardPass {
        let input = Array1::from(self.normalization.normalize(values).to_vec());

        let hidden_pre = input.dot(&self.state.w_input_hidden) + &self.state.b_hidden;
        let hidden = hidden_pre.mapv(relu);
        let output_pre = hidden.dot(&self.state.w_hidden_output) + &self.state.b_output;
        let output = output_pre.mapv(sigmoid);

        ForwardPass {
            input,
            hidden_pre,
            hidden,
            output_pre,
            output,
        }
    }

    /// One SGD step towards `(target_health / 100, 0)`.
    /// Returns the absolute health error before the update.
    pub fn train(&mut self, values: &SignalVector, target_health: f32) -> f32 {
        let target_health = if target_health.is_finite() {
            (target_health / 100.0).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let target = Array1::from(vec![target_health, 0.0]);

        let pass = self.forward_pass(values);
        let error = &pass.output - &target;

        let output_grad = Array1::from_shape_fn(OUTPUT_SIZE, |k| {
            error[k] * sigmoid_derivative(pass.output_pre[k])
        });
        let hidden_error = self.state.w_hidden_output.dot(&output_grad);
        let hidden_grad = Array1::from_shape_fn(HIDDEN_SIZE, |j| {
            hidden_error[j] * relu_derivative(pass.hidden_pre[j])
        });

        let lr = self.config.learning_rate;

        for j in 0..HIDDEN_SIZE {
            for k in 0..OUTPUT_SIZE {
                self.state.w_hidden_output[[j, k]] -= lr * output_grad[k] * pass.hidden[j];
            }
        }
        self.state.b_output.scaled_add(-lr, &output_grad);

        for i in 0..INPUT_SIZE {
            for j in 0..HIDDEN_SIZE {
                self.state.w_input_hidden[[i, j]] -= lr * hidden_grad[j] * pass.input[i];
            }
        }
        self.state.b_hidden.scaled_add(-lr, &hidden_grad);

        let abs_error = error[0].abs();
        let decay = self.config.error_decay;
        self.stats.sample_count += 1;
        self.stats.running_error = decay * self.stats.running_error + (1.0 - decay) * abs_error;
        self.stats.confidence = (self.config.confidence_floor
            + (1.0 - self.stats.running_error) * self.config.confidence_scale)
            .max(self.config.confidence_floor)
            .min(self.config.confidence_ceiling);

        self.history.push(HistoryEntry::new(values, target_health * 100.0));

        abs_error
    }

    /// Fresh weights and statistics, history cleared
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.state = NetworkState::xavier(rng);
        self.stats = TrainingStats {
            sample_count: 0,
            running_error: 1.0,
            confidence: self.config.confidence_floor,
        };
        self.history.clear();
    }
}
