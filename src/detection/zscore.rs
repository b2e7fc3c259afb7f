//! Robust z-score anomaly scoring.

use crate::error::{ForecastError, Result};
use crate::utils::stats;

/// Added to the MAD before dividing so a constant series scores zero
/// instead of dividing by zero.
pub const MAD_EPSILON: f64 = 1e-9;

/// Scales MAD-based scores to be comparable with standard-normal
/// z-scores (the 0.75 quantile of the standard normal).
pub const MAD_NORMAL_CONSISTENCY: f64 = 0.6745;

/// Compute the robust z-score of every point:
/// `0.6745 * (y - median) / (MAD + epsilon)`.
///
/// A single pass over the full series — no training phase, and adding a
/// constant to every value leaves the scores unchanged (the median shifts
/// with the data and the MAD does not move).
pub fn robust_zscores(values: &[f64]) -> Vec<f64> {
    let m = stats::median(values);
    let scale = stats::mad(values) + MAD_EPSILON;
    values
        .iter()
        .map(|&y| MAD_NORMAL_CONSISTENCY * (y - m) / scale)
        .collect()
}

/// Label points whose absolute robust z-score exceeds `threshold`.
pub fn zscore_labels(values: &[f64], threshold: f64) -> Result<Vec<u8>> {
    if values.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    if !(threshold > 0.0) {
        return Err(ForecastError::Configuration(format!(
            "zscore threshold must be positive, got {threshold}"
        )));
    }

    Ok(robust_zscores(values)
        .iter()
        .map(|&z| u8::from(z.abs() > threshold))
        .collect())
}
