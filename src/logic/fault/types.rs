//! Fault Types
//!
//! Fault labels and their maintenance metadata. No classification logic.

use serde::{Deserialize, Serialize};

// ============================================================================
// FAULT CLASS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultClass {
    #[serde(rename = "None")]
    None,
    /// Hot and vibrating
    #[serde(rename = "Bearing Wear")]
    BearingWear,
    /// Hot and drawing excess current
    #[serde(rename = "Overload")]
    Overload,
    /// Vibration alone at critical level
    #[serde(rename = "Misalignment")]
    Misalignment,
    #[serde(rename = "Overheating")]
    Overheating,
    /// Excess current with normal temperature
    #[serde(rename = "Electrical Issue")]
    ElectricalIssue,
}

impl FaultClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultClass::None => "None",
            FaultClass::BearingWear => "Bearing Wear",
            FaultClass::Overload => "Overload",
            FaultClass::Misalignment => "Misalignment",
            FaultClass::Overheating => "Overheating",
            FaultClass::ElectricalIssue => "Electrical Issue",
        }
    }

    pub fn is_fault(&self) -> bool {
        !matches!(self, FaultClass::None)
    }

    /// 0 = none, 3 = stop the asset
    pub fn severity(&self) -> u8 {
        match self {
            FaultClass::None => 0,
            FaultClass::ElectricalIssue => 1,
            FaultClass::Misalignment | FaultClass::Overheating => 2,
            FaultClass::BearingWear | FaultClass::Overload => 3,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FaultClass::None => "No fault pattern detected",
            FaultClass::BearingWear => "Elevated temperature together with elevated vibration",
            FaultClass::Overload => "Elevated temperature together with elevated current draw",
            FaultClass::Misalignment => "Critical vibration without a thermal signature",
            FaultClass::Overheating => "Critical temperature without mechanical or electrical load",
            FaultClass::ElectricalIssue => "Critical current draw at normal temperature",
        }
    }

    pub fn recommended_action(&self) -> &'static str {
        match self {
            FaultClass::None => "Continue normal monitoring",
            FaultClass::BearingWear => "Inspect and lubricate bearings, schedule replacement",
            FaultClass::Overload => "Reduce load and check the driven equipment for binding",
            FaultClass::Misalignment => {
                "Inspect immediately. Prepare for safe shutdown if vibration keeps rising"
            }
            FaultClass::Overheating => "Check cooling and ventilation paths",
            FaultClass::ElectricalIssue => "Inspect windings, supply voltage and connections",
        }
    }
}

impl Default for FaultClass {
    fn default() -> Self {
        FaultClass::None
    }
}

impl std::fmt::Display for FaultClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
