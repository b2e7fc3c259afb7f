//! Anomaly detection over univariate series.
//!
//! Two interchangeable strategies produce the same output: one 0/1 label
//! per input point, aligned with the input index. The robust z-score
//! strategy is a deterministic single-pass statistic; the isolation
//! strategy delegates to an [`OutlierModel`] and normalizes its labels.

mod isolation;
mod zscore;

pub use isolation::IsolationForest;
pub use zscore::{robust_zscores, zscore_labels, MAD_EPSILON, MAD_NORMAL_CONSISTENCY};

use crate::error::{ForecastError, Result};
use tracing::debug;

/// Label for an anomalous point.
pub const ANOMALOUS: u8 = 1;
/// Label for a normal point.
pub const NORMAL: u8 = 0;

/// Anomaly detection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyMethod {
    /// Robust z-score: median/MAD statistic with a fixed threshold.
    RobustZScore,
    /// Isolation forest with a contamination fraction and fixed seed.
    IsolationForest,
}

impl AnomalyMethod {
    /// Resolve a configured method name.
    ///
    /// Unknown names are a hard configuration error. Falling back to a
    /// default here would mask a misconfigured pipeline as a working one.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "zscore" => Ok(Self::RobustZScore),
            "isolation_forest" => Ok(Self::IsolationForest),
            other => Err(ForecastError::Configuration(format!(
                "unknown anomaly method `{other}` (expected `zscore` or `isolation_forest`)"
            ))),
        }
    }
}

/// Configuration for anomaly detection.
#[derive(Debug, Clone)]
pub struct AnomalyConfig {
    /// Strategy to apply.
    pub method: AnomalyMethod,
    /// Robust z-score cutoff; points with `|z|` above it are anomalous.
    pub zscore_threshold: f64,
    /// Expected fraction of anomalous points for the isolation strategy.
    pub contamination: f64,
    /// Seed for the isolation strategy, fixed for reproducible labels.
    pub seed: u64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            method: AnomalyMethod::RobustZScore,
            zscore_threshold: 3.0,
            contamination: 0.03,
            seed: 42,
        }
    }
}

impl AnomalyConfig {
    /// Robust z-score detection with the given threshold.
    pub fn zscore(threshold: f64) -> Self {
        Self {
            method: AnomalyMethod::RobustZScore,
            zscore_threshold: threshold,
            ..Self::default()
        }
    }

    /// Isolation-forest detection with the given contamination fraction.
    pub fn isolation_forest(contamination: f64) -> Self {
        Self {
            method: AnomalyMethod::IsolationForest,
            contamination,
            ..Self::default()
        }
    }
}

/// An unsupervised outlier model: fit on the samples and judge each one.
///
/// Implementations use the sign convention common to outlier libraries:
/// −1 for anomalous, +1 for normal. Detection code normalizes that to the
/// 0/1 labels the rest of the pipeline speaks, so any conforming model
/// can be swapped in.
pub trait OutlierModel {
    /// Fit to the samples and return one −1/+1 decision per sample.
    fn fit_predict(&mut self, samples: &[f64]) -> Result<Vec<i8>>;

    /// Model name for reports and logs.
    fn name(&self) -> &str;
}

/// Label each point of a series as anomalous (1) or normal (0).
///
/// Both strategies take the same input and return labels aligned 1:1
/// with it, so callers can switch strategies through configuration alone.
pub fn detect_anomalies(values: &[f64], config: &AnomalyConfig) -> Result<Vec<u8>> {
    if values.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    let labels = match config.method {
        AnomalyMethod::RobustZScore => zscore_labels(values, config.zscore_threshold)?,
        AnomalyMethod::IsolationForest => {
            let mut model = IsolationForest::new(config.contamination).with_seed(config.seed);
            detect_with_model(values, &mut model)?
        }
    };

    debug_assert_eq!(labels.len(), values.len());
    debug!(
        method = ?config.method,
        flagged = labels.iter().filter(|&&l| l == ANOMALOUS).count(),
        total = labels.len(),
        "anomaly detection complete"
    );
    Ok(labels)
}

/// Run an arbitrary outlier model and normalize its −1/+1 decisions to
/// 0/1 labels aligned with the input.
pub fn detect_with_model(values: &[f64], model: &mut dyn OutlierModel) -> Result<Vec<u8>> {
    if values.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    let decisions = model.fit_predict(values)?;
    if decisions.len() != values.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: values.len(),
            got: decisions.len(),
        });
    }

    Ok(decisions
        .iter()
        .map(|&d| if d == -1 { ANOMALOUS } else { NORMAL })
        .collect())
}
