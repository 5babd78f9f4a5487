//! Signal Normalization
//!
//! Linear min/max scaling against configured physical bounds, clamped to [0, 1].

use serde::{Deserialize, Serialize};

use super::layout::{SignalVector, SIGNAL_COUNT};

/// Physical range of one signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalBounds {
    pub min: f32,
    pub max: f32,
}

impl SignalBounds {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Scale into [0, 1]; values beyond the bounds clamp to 0 or 1
    pub fn normalize(&self, value: f32) -> f32 {
        let range = (self.max - self.min).max(1e-8);
        let scaled = (value - self.min) / range;

        if scaled.is_nan() {
            return 0.0;
        }
        scaled.clamp(0.0, 1.0)
    }
}

/// Per-signal bounds in layout order (typical industrial ranges)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    pub temperature: SignalBounds,
    pub vibration: SignalBounds,
    pub current: SignalBounds,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            temperature: SignalBounds::new(20.0, 120.0), // °C
            vibration: SignalBounds::new(0.0, 5.0),      // g (RMS)
            current: SignalBounds::new(0.0, 20.0),       // A
        }
    }
}

impl NormalizationConfig {
    pub fn bounds(&self) -> [SignalBounds; SIGNAL_COUNT] {
        [self.temperature, self.vibration, self.current]
    }

    /// Normalize a full signal vector
    pub fn normalize(&self, values: &SignalVector) -> SignalVector {
        let bounds = self.bounds();
        let mut normalized = [0.0f32; SIGNAL_COUNT];

        for i in 0..SIGNAL_COUNT {
            normalized[i] = bounds[i].normalize(values[i]);
        }

        normalized
    }
}
