//! Health status bands

use serde::{Deserialize, Serialize};

/// Health below `warning` is a warning, below `critical` is critical
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthBands {
    pub warning: f32,
    pub critical: f32,
}

impl Default for HealthBands {
    fn default() -> Self {
        Self {
            warning: 80.0,
            critical: 60.0,
        }
    }
}

impl HealthBands {
    pub fn status(&self, health: f32) -> HealthStatus {
        if health < self.critical {
            HealthStatus::Critical
        } else if health < self.warning {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }
}

/// Drives downstream alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Warning => "warning",
            HealthStatus::Critical => "critical",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
