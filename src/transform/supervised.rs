//! Lag-window construction for supervised sequence models.

use crate::error::{ForecastError, Result};

/// One supervised observation: `window_size` consecutive values and the
/// value immediately following them.
#[derive(Debug, Clone, PartialEq)]
pub struct SupervisedSample {
    /// Consecutive past values, oldest first.
    pub window: Vec<f64>,
    /// The value directly after the window.
    pub target: f64,
}

/// Build supervised samples from a series of values.
///
/// For an input of length `n` this yields exactly `n - window_size`
/// samples in time order; sample `i` covers `values[i..i + window_size]`
/// and targets `values[i + window_size]`. A pure function of its input —
/// calling it twice on the same data gives identical samples.
///
/// `window_size == 0` is an error. A window as long as the series (or
/// longer) yields no samples and returns an empty vector; callers that
/// need at least one sample check for emptiness themselves.
pub fn make_supervised(values: &[f64], window_size: usize) -> Result<Vec<SupervisedSample>> {
    if window_size == 0 {
        return Err(ForecastError::InvalidWindow(
            "window size must be positive".to_string(),
        ));
    }
    if window_size >= values.len() {
        return Ok(Vec::new());
    }

    let samples = (0..values.len() - window_size)
        .map(|i| SupervisedSample {
            window: values[i..i + window_size].to_vec(),
            target: values[i + window_size],
        })
        .collect();
    Ok(samples)
}

/// Split samples into parallel inputs and targets (X, y) for model APIs
/// that take them separately.
pub fn to_design_matrix(samples: &[SupervisedSample]) -> (Vec<Vec<f64>>, Vec<f64>) {
    let x = samples.iter().map(|s| s.window.clone()).collect();
    let y = samples.iter().map(|s| s.target).collect();
    (x, y)
}
