//! End-to-end tests for the engine module

use super::*;
use crate::logic::anomaly::ForestPhase;
use crate::logic::config::EngineConfig;
use crate::logic::fault::FaultClass;
use crate::logic::health::HealthStatus;
use crate::logic::signals::{IngestRecord, Sample, Signal};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn healthy(rng: &mut StdRng) -> Sample {
    Sample::new(
        40.0 + (rng.gen::<f32>() - 0.5) * 5.0,
        0.5 + (rng.gen::<f32>() - 0.5) * 0.2,
        5.0 + (rng.gen::<f32>() - 0.5) * 2.0,
    )
}

fn model(config: EngineConfig, seed: u64) -> HealthModel {
    HealthModel::with_rng("pump-01", config, StdRng::seed_from_u64(seed))
}

/// Model after `count` healthy samples
fn warmed_up(config: EngineConfig, seed: u64, count: usize) -> HealthModel {
    let mut model = model(config, seed);
    let mut samples = StdRng::seed_from_u64(seed + 1000);
    for _ in 0..count {
        let sample = healthy(&mut samples);
        model.process(&sample);
    }
    model
}

fn presets() -> [EngineConfig; 2] {
    [EngineConfig::teacher_student(), EngineConfig::isolation_forest()]
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_healthy_asset_scenario() {
    for config in presets() {
        for seed in 0..3 {
            let detector = config.detector;
            let mut model = warmed_up(config.clone(), seed, 100);

            let result = model.process(&Sample::new(41.0, 0.55, 5.2));
            assert!(result.health > 90.0, "{} seed {}: {:?}", detector, seed, result);
            assert!(!result.is_anomaly, "{} seed {}: {:?}", detector, seed, result);
            assert_eq!(result.status, HealthStatus::Healthy);
            assert_eq!(result.fault, FaultClass::None);
            assert!(result.rul > 800);
        }
    }
}

#[test]
fn test_sustained_overheating_scenario() {
    for config in presets() {
        for seed in 0..3 {
            let detector = config.detector;
            let mut model = warmed_up(config.clone(), seed, 100);
            model.process(&Sample::new(41.0, 0.55, 5.2));

            let mut last = None;
            for _ in 0..10 {
                last = Some(model.process(&Sample::new(90.0, 0.5, 5.0)));
            }
            let result = last.unwrap();

            assert!(result.health < 80.0, "{} seed {}: {:?}", detector, seed, result);
            assert_ne!(result.status, HealthStatus::Healthy);
            assert_eq!(result.fault, FaultClass::Overheating);
        }
    }
}

// ============================================================================
// FUSION
// ============================================================================

#[test]
fn test_extreme_readings_survive_forest_build() {
    let mut model = warmed_up(EngineConfig::isolation_forest(), 11, 48);
    model.process(&Sample::new(3.0e38, 0.5, 5.0));
    model.process(&Sample::new(-3.0e38, 0.5, 5.0));
    assert_eq!(model.status().detector.build_count, 1);

    let mut samples = StdRng::seed_from_u64(11);
    for _ in 0..60 {
        let result = model.process(&healthy(&mut samples));
        assert!(result.health.is_finite());
        assert!((0.0..=1.0).contains(&result.anomaly_score));
    }
    assert_eq!(model.status().detector.build_count, 2);
}

#[test]
fn test_overheating_detected_after_extreme_readings() {
    let mut model = warmed_up(EngineConfig::isolation_forest(), 12, 100);
    model.process(&Sample::new(3.0e38, 0.5, 5.0));
    model.process(&Sample::new(-3.0e38, 0.5, 5.0));

    let mut last = None;
    for _ in 0..200 {
        last = Some(model.process(&Sample::new(90.0, 0.5, 5.0)));
    }
    let result = last.unwrap();

    let temperature = model.drift().state(Signal::Temperature);
    assert!((temperature.mean - 90.0).abs() < 1.0, "{:?}", temperature);
    assert!(result.deterministic_health < 80.0, "{:?}", result);
    assert_eq!(result.fault, FaultClass::Overheating);
}

#[test]
fn test_fresh_model_uses_deterministic_health() {
    let mut model = model(EngineConfig::default(), 1);
    let result = model.process(&Sample::new(90.0, 0.5, 5.0));

    assert_eq!(result.prediction_source, PredictionSource::Deterministic);
    assert!((result.health - result.deterministic_health).abs() < 1e-6);
    // (90 - 60) * 2.0 * 0.4
    assert!((result.health - 76.0).abs() < 1e-4);
    assert_eq!(result.confidence, 0.5);
    assert_eq!(result.training_count, 1);
}

#[test]
fn test_training_count_and_confidence_bounds() {
    let mut model = model(EngineConfig::default(), 2);
    let mut samples = StdRng::seed_from_u64(2);

    for i in 1..=150u64 {
        let sample = healthy(&mut samples);
        let result = model.process(&sample);
        assert_eq!(result.training_count, i);
        assert!((0.5..=0.99).contains(&result.confidence));
        assert!((0.0..=1.0).contains(&result.anomaly_score));
        assert!((0.0..=100.0).contains(&result.health));
    }
    assert_eq!(model.samples_processed(), 150);
    assert_eq!(model.network().history().len(), 100);
}

#[test]
fn test_seeded_models_are_reproducible() {
    for config in presets() {
        let mut a = model(config.clone(), 9);
        let mut b = model(config, 9);
        let mut samples = StdRng::seed_from_u64(9);

        for _ in 0..80 {
            let sample = healthy(&mut samples);
            assert_eq!(a.process(&sample), b.process(&sample));
        }
    }
}

#[test]
fn test_statistical_outlier_is_flagged() {
    let mut model = warmed_up(EngineConfig::teacher_student(), 3, 100);
    let flagged_before = model.anomaly_count();
    let result = model.process(&Sample::new(40.0, 3.5, 5.0));

    assert!(result.is_anomaly);
    assert_eq!(result.anomaly_score, 1.0);
    assert_eq!(result.anomaly_reason.as_deref(), Some("vibration spike"));
    assert_eq!(result.fault, FaultClass::Misalignment);
    assert_eq!(model.anomaly_count(), flagged_before + 1);
}

#[test]
fn test_forest_outlier_reduces_confidence() {
    let mut model = warmed_up(EngineConfig::isolation_forest(), 4, 100);
    let confidence_before = model.network().confidence();

    let result = model.process(&Sample::new(45.0, 3.5, 5.5));

    assert!(result.is_anomaly, "{:?}", result);
    assert!(result.anomaly_score > 0.55);
    assert_eq!(result.anomaly_reason.as_deref(), Some("isolated outlier"));
    assert!(result.confidence < confidence_before);
    assert!(result.confidence >= 0.5);
}

#[test]
fn test_result_serializes_camel_case() {
    let mut model = model(EngineConfig::default(), 5);
    let result = model.process(&Sample::new(40.0, 0.5, 5.0));
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["predictionSource"], "deterministic");
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["fault"], "None");
    assert!(json.get("anomalyScore").is_some());
    assert!(json.get("isAnomaly").is_some());
    assert!(json.get("trainingCount").is_some());
}

#[test]
fn test_reset_clears_learning() {
    let mut model = warmed_up(EngineConfig::isolation_forest(), 6, 60);
    assert_eq!(model.status().detector.phase, Some(ForestPhase::Built));

    model.reset();
    let status = model.status();

    assert_eq!(status.samples_processed, 0);
    assert_eq!(status.training_count, 0);
    assert_eq!(status.history.current_size, 0);
    assert_eq!(status.detector.phase, Some(ForestPhase::Untrained));
    assert!(model.last_result().is_none());
}

#[test]
fn test_model_status() {
    let model = warmed_up(EngineConfig::isolation_forest(), 7, 60);
    let status = model.status();

    assert_eq!(status.asset_id, "pump-01");
    assert_eq!(status.architecture, "3→4→2");
    assert_eq!(status.samples_processed, 60);
    assert_eq!(status.history.current_size, 60);
    assert_eq!(status.history.capacity, 100);
    assert!((status.history.fill_percent - 60.0).abs() < 1e-3);
    assert_eq!(status.drift.len(), 3);
    assert_eq!(status.detector.tree_count, 100);
    assert_eq!(status.detector.buffer_size, 60);
    assert_eq!(status.detector.build_count, 1);
    assert_eq!(status.mode, "Learning");
    assert_eq!(status.last_status, Some(HealthStatus::Healthy));
}

// ============================================================================
// REGISTRY
// ============================================================================

#[test]
fn test_registry_isolates_assets() {
    let config = EngineConfig::default().with_seed(7);
    let registry = AssetRegistry::new(config.clone());

    for _ in 0..30 {
        registry.process("hot", &Sample::new(95.0, 2.8, 16.0));
    }
    let shared = registry.process("cool", &Sample::new(40.0, 0.5, 5.0));

    let seed = registry.asset_seed("cool").unwrap();
    let mut alone = HealthModel::with_rng("cool", config, StdRng::seed_from_u64(seed));
    let isolated = alone.process(&Sample::new(40.0, 0.5, 5.0));

    assert_eq!(shared, isolated);
    assert_eq!(registry.status("hot").unwrap().samples_processed, 30);
    assert_eq!(registry.status("cool").unwrap().samples_processed, 1);
    assert!(registry.status("missing").is_none());
}

#[test]
fn test_registry_derives_distinct_seeds() {
    let registry = AssetRegistry::new(EngineConfig::default().with_seed(1));
    assert_ne!(registry.asset_seed("a"), registry.asset_seed("b"));

    let unseeded = AssetRegistry::default();
    assert_eq!(unseeded.asset_seed("a"), None);
}

#[test]
fn test_registry_parallel_assets() {
    let registry = AssetRegistry::new(EngineConfig::isolation_forest().with_seed(3));
    let assets = ["pump-01", "pump-02", "fan-01", "compressor-01"];

    std::thread::scope(|scope| {
        for (i, asset) in assets.iter().enumerate() {
            let registry = &registry;
            scope.spawn(move || {
                let mut rng = StdRng::seed_from_u64(i as u64);
                for _ in 0..60 {
                    let sample = healthy(&mut rng);
                    registry.process(asset, &sample);
                }
            });
        }
    });

    assert_eq!(registry.len(), 4);
    assert_eq!(
        registry.asset_ids(),
        vec!["compressor-01", "fan-01", "pump-01", "pump-02"]
    );

    let fleet = registry.fleet_status();
    assert_eq!(fleet.asset_count, 4);
    assert_eq!(fleet.total_samples, 240);
    assert_eq!(fleet.healthy + fleet.warning + fleet.critical + fleet.unscored, 4);
    assert!(fleet.assets.iter().all(|a| a.detector.build_count == 1));
}

#[test]
fn test_registry_ingest_and_remove() {
    let registry = AssetRegistry::default();
    let record = IngestRecord::from_json(r#"{"nodeId": "motor-7", "temp": 50, "vib": 0.6, "current": 6, "timestamp": 1700000000000}"#)
        .unwrap();

    let output = registry.ingest(&record);
    assert_eq!(output.asset_id, "motor-7");
    assert_eq!(output.sample_timestamp, Some(1_700_000_000_000));
    assert_eq!(output.id.len(), 36);
    assert_eq!(output.result.training_count, 1);

    assert!(registry.remove("motor-7"));
    assert!(!registry.remove("motor-7"));
    assert!(registry.is_empty());
}
