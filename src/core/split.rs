//! Temporal train/test partitioning.

use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};

/// Split a series into a training prefix and a test suffix.
///
/// The cut point is `floor(len * train_ratio)`. Order is preserved and the
/// two parts concatenate back to the original series — downstream
/// evaluation is only meaningful if the test period strictly follows the
/// training period, so no shuffling ever happens here.
///
/// `train_ratio` must lie in the open interval (0, 1). A ratio that
/// produces an empty train or test side is returned as-is; callers decide
/// whether a degenerate side is usable.
pub fn train_test_split(
    series: &TimeSeries,
    train_ratio: f64,
) -> Result<(TimeSeries, TimeSeries)> {
    if !train_ratio.is_finite() || train_ratio <= 0.0 || train_ratio >= 1.0 {
        return Err(ForecastError::Configuration(format!(
            "train_ratio must be in (0, 1), got {train_ratio}"
        )));
    }

    let n = series.len();
    let cut = (n as f64 * train_ratio).floor() as usize;

    let train = series.slice(0, cut)?;
    let test = series.slice(cut, n)?;
    Ok((train, test))
}
