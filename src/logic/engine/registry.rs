//! Asset Registry - one independent model per asset
//!
//! The map lock is held only to look up or insert an entry. Each model sits
//! behind its own mutex, so samples of one asset are serialised while
//! different assets are processed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::fusion::HealthModel;
use super::types::{PredictionRecord, PredictionResult};
use crate::logic::config::EngineConfig;
use crate::logic::signals::{IngestRecord, Sample};
use crate::logic::status::{self, FleetStatus, ModelStatus};

pub struct AssetRegistry {
    config: EngineConfig,
    models: RwLock<HashMap<String, Arc<Mutex<HealthModel>>>>,
}

impl AssetRegistry {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            models: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Per-asset seed: `config.seed` XOR CRC32 of the asset id
    pub fn asset_seed(&self, asset_id: &str) -> Option<u64> {
        self.config
            .seed
            .map(|seed| seed ^ u64::from(crc32fast::hash(asset_id.as_bytes())))
    }

    /// Existing model for the asset, or a new one
    pub fn model(&self, asset_id: &str) -> Arc<Mutex<HealthModel>> {
        if let Some(model) = self.models.read().get(asset_id) {
            return Arc::clone(model);
        }

        let mut models = self.models.write();
        let model = models.entry(asset_id.to_string()).or_insert_with(|| {
            let rng = match self.asset_seed(asset_id) {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Arc::new(Mutex::new(HealthModel::with_rng(asset_id, self.config.clone(), rng)))
        });
        Arc::clone(model)
    }

    pub fn process(&self, asset_id: &str, sample: &Sample) -> PredictionResult {
        let model = self.model(asset_id);
        let result = model.lock().process(sample);
        result
    }

    pub fn ingest(&self, record: &IngestRecord) -> PredictionRecord {
        let result = self.process(&record.asset_id, &record.sample);
        PredictionRecord::new(&record.asset_id, record.sample.timestamp, result)
    }

    pub fn status(&self, asset_id: &str) -> Option<ModelStatus> {
        let model = self.models.read().get(asset_id).cloned()?;
        let status = model.lock().status();
        Some(status)
    }

    pub fn fleet_status(&self) -> FleetStatus {
        let models: Vec<Arc<Mutex<HealthModel>>> = self.models.read().values().cloned().collect();
        let statuses: Vec<ModelStatus> = models.iter().map(|m| m.lock().status()).collect();
        status::collect_fleet(statuses)
    }

    /// Sorted
    pub fn asset_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.models.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn remove(&self, asset_id: &str) -> bool {
        let removed = self.models.write().remove(asset_id).is_some();
        if removed {
            log::info!("Removed health model for '{}'", asset_id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
