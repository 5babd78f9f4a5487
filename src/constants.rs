//! Central Configuration Constants
//!
//! Single source of truth for process-level defaults and the environment
//! variables that override them.

use std::path::PathBuf;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "AssetSense";

/// Asset id used when a payload carries none
pub const DEFAULT_ASSET_ID: &str = "default";

/// Directory under the platform config dir
pub const CONFIG_DIR_NAME: &str = "assetsense";

pub const CONFIG_FILE_NAME: &str = "engine.json";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Default engine config location, e.g. `~/.config/assetsense/engine.json`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// Get config file path from environment or use default
pub fn get_config_path() -> PathBuf {
    std::env::var("ASSETSENSE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path())
}

/// Named preset (`teacher_student` / `isolation_forest`) used when no config file exists
pub fn get_preset() -> Option<String> {
    std::env::var("ASSETSENSE_PRESET").ok()
}

/// Detector override (`statistical` / `isolation_forest`)
pub fn get_detector_override() -> Option<String> {
    std::env::var("ASSETSENSE_DETECTOR").ok()
}

/// Anomaly sensitivity (`high` / `normal` / `low`)
pub fn get_sensitivity_override() -> Option<String> {
    std::env::var("ASSETSENSE_SENSITIVITY").ok()
}

/// Seed for reproducible model initialisation
pub fn get_seed_override() -> Option<u64> {
    std::env::var("ASSETSENSE_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
}

/// Learning rate override for the online network
pub fn get_learning_rate_override() -> Option<f32> {
    std::env::var("ASSETSENSE_LEARNING_RATE")
        .ok()
        .and_then(|s| s.parse().ok())
}
