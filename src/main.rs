//! AssetSense - line-oriented driver
//!
//! Reads one JSON sample record per line from stdin, routes it to the
//! asset's model and writes one JSON prediction record per line to stdout.

use std::io::{self, BufRead, Write};

use assetsense_core::constants::{APP_NAME, APP_VERSION};
use assetsense_core::{AssetRegistry, EngineConfig, IngestRecord};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let config = match EngineConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Engine config: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Engine ready: {} detector, {} estimator",
        config.detector,
        config.estimator.model.as_str()
    );

    let registry = AssetRegistry::new(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut processed = 0u64;
    let mut rejected = 0u64;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Reading stdin: {}", e);
                break;
            }
        };

        let payload = line.trim();
        if payload.is_empty() {
            continue;
        }

        let record = match IngestRecord::from_json(payload) {
            Ok(record) => record,
            Err(e) => {
                rejected += 1;
                log::warn!("Skipping malformed payload: {}", e);
                continue;
            }
        };

        let output = registry.ingest(&record);
        processed += 1;

        match serde_json::to_string(&output) {
            Ok(json) => {
                if writeln!(out, "{}", json).is_err() {
                    break;
                }
            }
            Err(e) => log::warn!("Serializing prediction for '{}': {}", output.asset_id, e),
        }
    }

    let fleet = registry.fleet_status();
    log::info!(
        "Processed {} samples ({} rejected) across {} assets: {} healthy, {} warning, {} critical, {} anomalies",
        processed,
        rejected,
        fleet.asset_count,
        fleet.healthy,
        fleet.warning,
        fleet.critical,
        fleet.total_anomalies
    );
}
