//! Isolation forest for univariate outlier detection.
//!
//! Anomalous values sit alone in the tails, so random axis splits
//! separate them from the bulk in fewer steps. Short average path length
//! across a forest of random trees means anomalous.

use crate::detection::OutlierModel;
use crate::error::{ForecastError, Result};
use rand::prelude::*;

const EULER_MASCHERONI: f64 = 0.577_215_664_901_532_9;

/// A node in an isolation tree. Univariate data needs no feature choice,
/// only a split value.
#[derive(Debug, Clone)]
enum Node {
    Internal {
        split: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        size: usize,
    },
}

fn build_node(data: &[f64], depth: usize, max_depth: usize, rng: &mut StdRng) -> Node {
    if depth >= max_depth || data.len() <= 1 {
        return Node::Leaf { size: data.len() };
    }

    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max - min < 1e-10 {
        return Node::Leaf { size: data.len() };
    }

    let split = rng.gen_range(min..max);
    let (left, right): (Vec<f64>, Vec<f64>) = data.iter().copied().partition(|&v| v < split);
    if left.is_empty() || right.is_empty() {
        return Node::Leaf { size: data.len() };
    }

    Node::Internal {
        split,
        left: Box::new(build_node(&left, depth + 1, max_depth, rng)),
        right: Box::new(build_node(&right, depth + 1, max_depth, rng)),
    }
}

fn path_length(node: &Node, sample: f64, depth: usize) -> f64 {
    match node {
        Node::Leaf { size } => depth as f64 + average_path_length(*size),
        Node::Internal { split, left, right } => {
            if sample < *split {
                path_length(left, sample, depth + 1)
            } else {
                path_length(right, sample, depth + 1)
            }
        }
    }
}

/// Expected path length of an unsuccessful search in a BST of `n` nodes;
/// normalizes depths so trees of different sizes are comparable.
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_MASCHERONI) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Seeded isolation forest over scalar samples.
///
/// Implements [`OutlierModel`]: `fit_predict` returns −1 for anomalous
/// and +1 for normal points. The same seed and input always produce the
/// same labels.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    /// Number of trees.
    n_estimators: usize,
    /// Subsample size per tree.
    max_samples: usize,
    /// Expected fraction of anomalous points, in [0, 0.5].
    contamination: f64,
    seed: u64,
}

impl IsolationForest {
    /// Create a forest with the given contamination fraction and the
    /// conventional defaults: 100 trees, 256 samples per tree, seed 42.
    pub fn new(contamination: f64) -> Self {
        Self {
            n_estimators: 100,
            max_samples: 256,
            contamination,
            seed: 42,
        }
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of trees.
    pub fn with_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    /// Anomaly score per sample in (0, 1]: `2^(-E[h(x)] / c(psi))`.
    /// Higher means more isolated.
    fn score_samples(&self, trees: &[Node], psi: usize, samples: &[f64]) -> Vec<f64> {
        let normalizer = average_path_length(psi);
        samples
            .iter()
            .map(|&x| {
                let mean_path: f64 =
                    trees.iter().map(|t| path_length(t, x, 0)).sum::<f64>() / trees.len() as f64;
                if normalizer > 0.0 {
                    2.0_f64.powf(-mean_path / normalizer)
                } else {
                    0.5
                }
            })
            .collect()
    }
}

impl OutlierModel for IsolationForest {
    fn fit_predict(&mut self, samples: &[f64]) -> Result<Vec<i8>> {
        if samples.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        if !(0.0..=0.5).contains(&self.contamination) {
            return Err(ForecastError::Configuration(format!(
                "contamination must be in [0, 0.5], got {}",
                self.contamination
            )));
        }
        if samples.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::DataQuality(
                "isolation forest input contains missing values".to_string(),
            ));
        }
        if self.n_estimators == 0 {
            return Err(ForecastError::Configuration(
                "isolation forest needs at least one tree".to_string(),
            ));
        }

        let n = samples.len();
        let psi = self.max_samples.min(n);
        let max_depth = (psi as f64).log2().ceil().max(1.0) as usize;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let trees: Vec<Node> = (0..self.n_estimators)
            .map(|_| {
                let subsample: Vec<f64> = (0..n)
                    .choose_multiple(&mut rng, psi)
                    .into_iter()
                    .map(|i| samples[i])
                    .collect();
                build_node(&subsample, 0, max_depth, &mut rng)
            })
            .collect();

        let scores = self.score_samples(&trees, psi, samples);

        // Threshold at the contamination quantile of the scores.
        let flagged = (n as f64 * self.contamination).floor() as usize;
        let spread = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max)
            - scores.iter().copied().fold(f64::INFINITY, f64::min);
        if flagged == 0 || spread < 1e-12 {
            // Nothing to flag: contamination rounds to zero points, or all
            // scores tie (constant input) and any cut would be arbitrary.
            return Ok(vec![1; n]);
        }

        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        let threshold = sorted[flagged - 1];

        Ok(scores
            .iter()
            .map(|&s| if s >= threshold { -1 } else { 1 })
            .collect())
    }

    fn name(&self) -> &str {
        "IsolationForest"
    }
}
