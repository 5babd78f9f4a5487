//! Signal Layout - Centralized Signal Definition
//!
//! **This file controls the order of signals in every vector the engine uses**
//!
//! The drift tracker, penalty tables, normalization bounds, the network input
//! layer and the isolation forest all index signals through `Signal`.
//! Changing the order means incrementing `SIGNAL_VERSION`.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// SIGNAL VERSION
// ============================================================================

/// Current signal layout version
pub const SIGNAL_VERSION: u8 = 1;

// ============================================================================
// SIGNAL LAYOUT (Authoritative source)
// ============================================================================

/// Signal names in exact order they appear in a `SignalVector`
pub const SIGNAL_LAYOUT: &[&str] = &[
    "temperature", // 0: bearing/housing temperature (°C)
    "vibration",   // 1: RMS vibration (g)
    "current",     // 2: motor current draw (A)
];

/// Total number of signals
/// IMPORTANT: Must match SIGNAL_LAYOUT.len()!
pub const SIGNAL_COUNT: usize = 3;

/// Raw signal triple in layout order
pub type SignalVector = [f32; SIGNAL_COUNT];

/// Typed index into a `SignalVector`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Temperature,
    Vibration,
    Current,
}

impl Signal {
    /// All signals, in layout order
    pub const ALL: [Signal; SIGNAL_COUNT] = [Signal::Temperature, Signal::Vibration, Signal::Current];

    pub fn index(self) -> usize {
        match self {
            Signal::Temperature => 0,
            Signal::Vibration => 1,
            Signal::Current => 2,
        }
    }

    pub fn name(self) -> &'static str {
        SIGNAL_LAYOUT[self.index()]
    }

    /// Unit used in logs and diagnostics
    pub fn unit(self) -> &'static str {
        match self {
            Signal::Temperature => "°C",
            Signal::Vibration => "g",
            Signal::Current => "A",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 of the signal layout, reported in diagnostics
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[SIGNAL_VERSION]);

    for name in SIGNAL_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// TESTS
// ============================================================================
