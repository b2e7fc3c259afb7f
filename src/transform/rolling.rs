//! Trailing rolling statistics for feature extraction.

use crate::error::{ForecastError, Result};
use crate::utils::stats;

/// Compute the trailing rolling mean.
///
/// Entry `i` is the mean of `series[i + 1 - window..=i]`; the first
/// `window - 1` entries are NaN (warm-up).
pub fn rolling_mean(series: &[f64], window: usize) -> Result<Vec<f64>> {
    rolling_apply(series, window, stats::mean)
}

/// Compute the trailing rolling sample standard deviation.
///
/// Windows shorter than 2 have no sample deviation, so a window of 1
/// yields NaN everywhere just as the warm-up region does.
pub fn rolling_std(series: &[f64], window: usize) -> Result<Vec<f64>> {
    rolling_apply(series, window, stats::std_dev)
}

fn rolling_apply<F>(series: &[f64], window: usize, f: F) -> Result<Vec<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    if window == 0 {
        return Err(ForecastError::InvalidWindow(
            "rolling window must be positive".to_string(),
        ));
    }

    let mut result = vec![f64::NAN; series.len()];
    for i in (window - 1)..series.len() {
        result[i] = f(&series[i + 1 - window..=i]);
    }
    Ok(result)
}

/// Rolling mean/std columns over several window sizes.
#[derive(Debug, Clone)]
pub struct RollingFeatures {
    /// Window sizes, in the order given.
    pub windows: Vec<usize>,
    /// One rolling-mean column per window.
    pub means: Vec<Vec<f64>>,
    /// One rolling-std column per window.
    pub stds: Vec<Vec<f64>>,
    /// First row index at which every column is defined. Rows before this
    /// are warm-up and typically dropped by callers.
    pub valid_from: usize,
}

/// Build rolling mean and standard deviation features for each window
/// size. All columns are aligned with the input; `valid_from` marks where
/// the longest window has filled.
pub fn rolling_features(series: &[f64], windows: &[usize]) -> Result<RollingFeatures> {
    if windows.is_empty() {
        return Err(ForecastError::Configuration(
            "at least one rolling window is required".to_string(),
        ));
    }

    let mut means = Vec::with_capacity(windows.len());
    let mut stds = Vec::with_capacity(windows.len());
    for &w in windows {
        if w < 2 {
            return Err(ForecastError::InvalidWindow(
                "feature windows need at least 2 observations for a deviation".to_string(),
            ));
        }
        means.push(rolling_mean(series, w)?);
        stds.push(rolling_std(series, w)?);
    }

    let longest = windows.iter().copied().max().unwrap_or(2);
    let valid_from = (longest - 1).min(series.len());

    Ok(RollingFeatures {
        windows: windows.to_vec(),
        means,
        stds,
        valid_from,
    })
}
