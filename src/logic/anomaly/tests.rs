//! Unit tests for the anomaly module

use super::forest::{average_path_length, NEUTRAL_SCORE};
use super::statistical::REASON_INSUFFICIENT_DATA;
use super::*;
use crate::logic::model::{HistoryBuffer, HistoryEntry};
use crate::logic::signals::SignalVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn healthy(rng: &mut StdRng) -> SignalVector {
    [
        40.0 + (rng.gen::<f32>() - 0.5) * 5.0,
        0.5 + (rng.gen::<f32>() - 0.5) * 0.2,
        5.0 + (rng.gen::<f32>() - 0.5) * 2.0,
    ]
}

fn healthy_history(count: usize, seed: u64) -> HistoryBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut history = HistoryBuffer::default();
    for _ in 0..count {
        history.push(HistoryEntry::new(&healthy(&mut rng), 100.0));
    }
    history
}

fn trained_forest(seed: u64) -> IsolationForest {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut forest = IsolationForest::new(ForestConfig::default());
    for _ in 0..100 {
        let sample = healthy(&mut rng);
        forest.observe(sample, &mut rng);
    }
    forest
}

// ============================================================================
// STATISTICAL
// ============================================================================

#[test]
fn test_statistical_insufficient_history_is_zero() {
    let detector = StatisticalDetector::default();
    let history = healthy_history(9, 1);

    let outcome = detector.score(&[500.0, 50.0, 500.0], &history);
    assert_eq!(outcome.score, 0.0);
    assert_eq!(outcome.reason, Some(REASON_INSUFFICIENT_DATA));
}

#[test]
fn test_statistical_in_distribution_is_low() {
    let detector = StatisticalDetector::default();
    let history = healthy_history(100, 2);

    let outcome = detector.score(&[40.0, 0.5, 5.0], &history);
    assert!(outcome.score < 0.5, "score {}", outcome.score);
    assert_eq!(outcome.reason, None);
}

#[test]
fn test_statistical_far_outlier_names_signal() {
    let detector = StatisticalDetector::default();
    let history = healthy_history(50, 3);

    let outcome = detector.score(&[40.0, 3.5, 5.0], &history);
    assert!(outcome.score > 0.5);
    assert_eq!(outcome.reason, Some("vibration spike"));

    let outcome = detector.score(&[95.0, 0.5, 5.0], &history);
    assert_eq!(outcome.score, 1.0);
    assert_eq!(outcome.reason, Some("temperature spike"));
}

#[test]
fn test_statistical_flat_history_uses_std_floor() {
    let detector = StatisticalDetector::default();
    let mut history = HistoryBuffer::default();
    for _ in 0..20 {
        history.push(HistoryEntry::new(&[40.0, 0.5, 5.0], 100.0));
    }

    let same = detector.score(&[40.0, 0.5, 5.0], &history);
    assert_eq!(same.score, 0.0);

    let moved = detector.score(&[40.0, 0.5, 6.0], &history);
    assert!(moved.score.is_finite());
    assert_eq!(moved.score, 1.0);
    assert_eq!(moved.reason, Some("current spike"));
}

// ============================================================================
// ISOLATION FOREST
// ============================================================================

#[test]
fn test_average_path_length() {
    assert_eq!(average_path_length(0), 0.0);
    assert_eq!(average_path_length(1), 0.0);
    assert!((average_path_length(2) - 0.154_431).abs() < 1e-4);
    assert!(average_path_length(256) > average_path_length(64));
}

#[test]
fn test_empty_forest_is_neutral() {
    let forest = IsolationForest::new(ForestConfig::default());

    assert_eq!(forest.score(&[40.0, 0.5, 5.0]), NEUTRAL_SCORE);
    assert_eq!(forest.phase(), ForestPhase::Untrained);
}

#[test]
fn test_forest_build_schedule() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut forest = IsolationForest::new(ForestConfig::default());

    for i in 1..=49 {
        let sample = healthy(&mut rng);
        assert!(!forest.observe(sample, &mut rng), "rebuilt early at {}", i);
    }
    assert_eq!(forest.phase(), ForestPhase::Untrained);

    let sample = healthy(&mut rng);
    assert!(forest.observe(sample, &mut rng));
    assert_eq!(forest.phase(), ForestPhase::Built);
    assert_eq!(forest.tree_count(), 100);
    assert_eq!(forest.build_count(), 1);

    for _ in 0..49 {
        let sample = healthy(&mut rng);
        forest.observe(sample, &mut rng);
    }
    assert_eq!(forest.build_count(), 1);
    assert_eq!(forest.samples_since_build(), 49);

    let sample = healthy(&mut rng);
    assert!(forest.observe(sample, &mut rng));
    assert_eq!(forest.build_count(), 2);
}

#[test]
fn test_forest_buffer_is_capped() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut forest = IsolationForest::new(ForestConfig::default());

    for _ in 0..300 {
        let sample = healthy(&mut rng);
        forest.observe(sample, &mut rng);
    }
    assert_eq!(forest.buffer_len(), 128);
}

#[test]
fn test_forest_separates_outlier_from_cluster() {
    for seed in 0..5 {
        let forest = trained_forest(seed);

        let typical = forest.score(&[41.0, 0.55, 5.2]);
        let centre = forest.score(&[40.0, 0.5, 5.0]);
        let outlier = forest.score(&[45.0, 3.5, 5.5]);

        assert!(typical < 0.55, "seed {}: typical {}", seed, typical);
        assert!(centre < 0.55, "seed {}: centre {}", seed, centre);
        assert!(outlier > 0.55, "seed {}: outlier {}", seed, outlier);
        assert!(outlier > typical);
    }
}

#[test]
fn test_tree_depth_respects_height_limit() {
    let mut rng = StdRng::seed_from_u64(13);
    let points: Vec<SignalVector> = (0..64).map(|_| healthy(&mut rng)).collect();
    let tree = IsolationTree::build(&points, 6, &mut rng);

    // A full binary tree of height 6 has at most 127 nodes
    assert!(tree.node_count() <= 127);
    for point in &points {
        assert!(tree.path_length(point) <= 6.0 + average_path_length(64));
    }
}

#[test]
fn test_identical_points_make_single_leaf() {
    let mut rng = StdRng::seed_from_u64(14);
    let points = vec![[40.0, 0.5, 5.0]; 16];
    let tree = IsolationTree::build(&points, 4, &mut rng);

    assert_eq!(tree.node_count(), 1);
    assert!((tree.path_length(&points[0]) - average_path_length(16)).abs() < 1e-6);
}

// ============================================================================
// DISPATCH
// ============================================================================

#[test]
fn test_detector_dispatch_and_status() {
    let mut rng = StdRng::seed_from_u64(15);
    let history = healthy_history(20, 15);
    let fusion = crate::logic::model::FusionConfig::default();

    let mut statistical = AnomalyDetector::new(
        DetectorKind::Statistical,
        &StatisticalConfig::default(),
        &ForestConfig::default(),
    );
    assert_eq!(statistical.kind(), DetectorKind::Statistical);
    assert_eq!(statistical.threshold(&fusion), 0.5);
    let outcome = statistical.assess(&[40.0, 0.5, 5.0], &[40.0, 0.5, 5.0], &history, &mut rng);
    assert!(outcome.score < 0.5);
    assert_eq!(statistical.status().phase, None);

    let mut forest = AnomalyDetector::new(
        DetectorKind::IsolationForest,
        &StatisticalConfig::default(),
        &ForestConfig::default(),
    );
    assert_eq!(forest.threshold(&fusion), 0.55);
    let outcome = forest.assess(&[40.0, 0.5, 5.0], &[40.0, 0.5, 5.0], &history, &mut rng);
    assert_eq!(outcome.score, NEUTRAL_SCORE);

    let status = forest.status();
    assert_eq!(status.algorithm, "isolation_forest");
    assert_eq!(status.buffer_size, 1);
    assert_eq!(status.phase, Some(ForestPhase::Untrained));

    forest.reset();
    assert_eq!(forest.status().buffer_size, 0);
}

#[test]
fn test_detector_kind_parse() {
    assert_eq!(DetectorKind::parse("forest"), Some(DetectorKind::IsolationForest));
    assert_eq!(DetectorKind::parse("Isolation-Forest"), Some(DetectorKind::IsolationForest));
    assert_eq!(DetectorKind::parse("statistical"), Some(DetectorKind::Statistical));
    assert_eq!(DetectorKind::parse("svm"), None);
}
