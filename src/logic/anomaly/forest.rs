//! Isolation Forest - unsupervised outlier scoring
//!
//! Each tree partitions a random subsample with random axis-aligned splits.
//! Outliers are isolated close to the root, so a short average path length
//! means a high score: `2^(-E[h(x)] / c(sample_size))`.
//!
//! Trees are stored as node arenas and built with an explicit work stack.

use std::collections::VecDeque;

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::schedule::{ForestPhase, RebuildPolicy};
use crate::logic::signals::{SignalVector, SIGNAL_COUNT};

const EULER_GAMMA: f32 = 0.577_215_7;

/// Score of a forest with no trees
pub const NEUTRAL_SCORE: f32 = 0.5;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub tree_count: usize,

    /// Points drawn per tree; the rolling buffer holds twice as many
    pub sample_size: usize,

    pub rebuild: RebuildPolicy,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            tree_count: 100,
            sample_size: 64,
            rebuild: RebuildPolicy::default(),
        }
    }
}

impl ForestConfig {
    pub fn buffer_capacity(&self) -> usize {
        self.sample_size * 2
    }

    /// ⌈log2(sample_size)⌉
    pub fn height_limit(&self) -> usize {
        (self.sample_size.max(1) as f32).log2().ceil() as usize
    }
}

/// Average path length of an unsuccessful BST search over `n` points
pub fn average_path_length(n: usize) -> f32 {
    if n <= 1 {
        return 0.0;
    }
    let n = n as f32;
    2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
}

// ============================================================================
// TREE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        value: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        size: usize,
    },
}

struct BuildTask {
    node: usize,
    indices: Vec<usize>,
    depth: usize,
}

#[derive(Debug, Clone)]
pub struct IsolationTree {
    nodes: Vec<Node>,
}

impl IsolationTree {
    pub fn build<R: Rng>(points: &[SignalVector], height_limit: usize, rng: &mut R) -> Self {
        let mut nodes = vec![Node::Leaf { size: points.len() }];
        let mut stack = vec![BuildTask {
            node: 0,
            indices: (0..points.len()).collect(),
            depth: 0,
        }];

        while let Some(task) = stack.pop() {
            let size = task.indices.len();
            if task.depth >= height_limit || size <= 1 {
                nodes[task.node] = Node::Leaf { size };
                continue;
            }

            let feature = rng.gen_range(0..SIGNAL_COUNT);
            let (min, max) = task
                .indices
                .iter()
                .map(|&i| points[i][feature])
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

            // Also catches a span too wide for f32
            if !(max > min) || !(max - min).is_finite() {
                nodes[task.node] = Node::Leaf { size };
                continue;
            }

            let value = rng.gen_range(min..max);
            let (left_indices, right_indices): (Vec<usize>, Vec<usize>) =
                task.indices.iter().partition(|&&i| points[i][feature] < value);

            let left = nodes.len();
            nodes.push(Node::Leaf { size: left_indices.len() });
            let right = nodes.len();
            nodes.push(Node::Leaf { size: right_indices.len() });

            nodes[task.node] = Node::Split {
                feature,
                value,
                left,
                right,
            };

            stack.push(BuildTask {
                node: right,
                indices: right_indices,
                depth: task.depth + 1,
            });
            stack.push(BuildTask {
                node: left,
                indices: left_indices,
                depth: task.depth + 1,
            });
        }

        Self { nodes }
    }

    /// Edges to the leaf plus `c(leaf size)` for the unbuilt subtree
    pub fn path_length(&self, point: &SignalVector) -> f32 {
        let mut index = 0;
        let mut depth = 0.0f32;

        loop {
            match self.nodes[index] {
                Node::Leaf { size } => return depth + average_path_length(size),
                Node::Split {
                    feature,
                    value,
                    left,
                    right,
                } => {
                    index = if point[feature] < value { left } else { right };
                    depth += 1.0;
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

// ============================================================================
// FOREST
// ============================================================================

#[derive(Debug, Clone)]
pub struct IsolationForest {
    config: ForestConfig,
    trees: Vec<IsolationTree>,
    buffer: VecDeque<SignalVector>,
    samples_since_build: usize,
    build_count: u64,
}

impl IsolationForest {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            buffer: VecDeque::with_capacity(config.buffer_capacity()),
            config,
            trees: Vec::new(),
            samples_since_build: 0,
            build_count: 0,
        }
    }

    /// Anomaly score in (0, 1]; `NEUTRAL_SCORE` until the first build
    pub fn score(&self, point: &SignalVector) -> f32 {
        if self.trees.is_empty() {
            return NEUTRAL_SCORE;
        }

        let total: f32 = self.trees.iter().map(|t| t.path_length(point)).sum();
        let average = total / self.trees.len() as f32;
        let normalizer = average_path_length(self.config.sample_size);

        if normalizer <= 0.0 {
            return NEUTRAL_SCORE;
        }
        2f32.powf(-average / normalizer)
    }

    /// Buffer a sample and rebuild when the schedule says so.
    /// Returns true when the trees were rebuilt.
    pub fn observe<R: Rng>(&mut self, point: SignalVector, rng: &mut R) -> bool {
        while self.buffer.len() >= self.config.buffer_capacity().max(1) {
            self.buffer.pop_front();
        }
        self.buffer.push_back(point);
        self.samples_since_build += 1;

        let due = self.config.rebuild.should_rebuild(
            self.build_count,
            self.buffer.len(),
            self.samples_since_build,
        );
        if due {
            self.fit(rng);
        }
        due
    }

    /// Rebuild every tree from the current buffer
    pub fn fit<R: Rng>(&mut self, rng: &mut R) {
        if self.buffer.is_empty() {
            return;
        }

        let points: Vec<SignalVector> = self.buffer.iter().copied().collect();
        let subsample = self.config.sample_size.min(points.len());
        let height_limit = self.config.height_limit();

        self.trees = (0..self.config.tree_count)
            .map(|_| {
                let chosen: Vec<SignalVector> = index::sample(rng, points.len(), subsample)
                    .into_iter()
                    .map(|i| points[i])
                    .collect();
                IsolationTree::build(&chosen, height_limit, rng)
            })
            .collect();

        self.samples_since_build = 0;
        self.build_count += 1;

        log::debug!(
            "Isolation forest rebuilt: {} trees over {} of {} samples (build #{})",
            self.trees.len(),
            subsample,
            points.len(),
            self.build_count
        );
    }

    pub fn phase(&self) -> ForestPhase {
        self.config.rebuild.phase(self.build_count, self.samples_since_build)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn build_count(&self) -> u64 {
        self.build_count
    }

    pub fn samples_since_build(&self) -> usize {
        self.samples_since_build
    }

    pub fn reset(&mut self) {
        self.trees.clear();
        self.buffer.clear();
        self.samples_since_build = 0;
        self.build_count = 0;
    }
}
