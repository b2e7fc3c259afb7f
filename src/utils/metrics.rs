//! Forecast accuracy metrics and the variability diagnostic.

use crate::error::{ForecastError, Result};
use crate::utils::stats;
use std::fmt;

/// Qualitative assessment of the variability ratio `std(pred)/std(true)`.
///
/// Buckets are tested in declaration order; the under/over checks come
/// first so a ratio of e.g. 1.6 reads as over-variable rather than
/// excellent. Boundaries match the reporting format of existing tooling
/// and must not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariabilityBucket {
    /// Ratio below 0.5: forecasts much smoother than reality.
    UnderVariable,
    /// Ratio above 1.5: forecasts swing harder than reality.
    OverVariable,
    /// Ratio above 0.75: captures most of the real variability.
    ExcellentCapture,
    /// Ratio above 0.6.
    GoodCapture,
    /// Everything else (0.5 to 0.6).
    AcceptableCapture,
}

impl VariabilityBucket {
    /// Classify a variability ratio.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.5 {
            Self::UnderVariable
        } else if ratio > 1.5 {
            Self::OverVariable
        } else if ratio > 0.75 {
            Self::ExcellentCapture
        } else if ratio > 0.6 {
            Self::GoodCapture
        } else {
            Self::AcceptableCapture
        }
    }
}

impl fmt::Display for VariabilityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UnderVariable => "under-variable",
            Self::OverVariable => "over-variable",
            Self::ExcellentCapture => "excellent capture",
            Self::GoodCapture => "good capture",
            Self::AcceptableCapture => "acceptable capture",
        };
        f.write_str(label)
    }
}

/// Evaluation of a forecast against observed values.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    /// Mean absolute error.
    pub mae: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// `std(y_pred) / std(y_true)` (sample standard deviations).
    pub variability_ratio: f64,
    /// Qualitative bucket for the variability ratio.
    pub bucket: VariabilityBucket,
}

/// Mean absolute error between observed and predicted values.
pub fn mae(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_paired(y_true, y_pred)?;
    let n = y_true.len() as f64;
    Ok(y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).abs())
        .sum::<f64>()
        / n)
}

/// Root mean squared error between observed and predicted values.
pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_paired(y_true, y_pred)?;
    let n = y_true.len() as f64;
    let mse = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum::<f64>()
        / n;
    Ok(mse.sqrt())
}

/// Score a forecast: MAE, RMSE, and the variability diagnostic.
///
/// Inputs must be the same non-zero length. A constant (or single-point)
/// `y_true` has no sample deviation, which makes the variability ratio
/// meaningless — that fails with a data-quality error rather than
/// returning an infinite ratio.
pub fn evaluate(y_true: &[f64], y_pred: &[f64]) -> Result<EvaluationReport> {
    let mae = mae(y_true, y_pred)?;
    let rmse = rmse(y_true, y_pred)?;

    let std_true = stats::std_dev(y_true);
    if !(std_true > 0.0) {
        return Err(ForecastError::DataQuality(
            "observed values have zero variance; variability ratio is undefined".to_string(),
        ));
    }

    let variability_ratio = stats::std_dev(y_pred) / std_true;
    Ok(EvaluationReport {
        mae,
        rmse,
        variability_ratio,
        bucket: VariabilityBucket::from_ratio(variability_ratio),
    })
}

fn check_paired(y_true: &[f64], y_pred: &[f64]) -> Result<()> {
    if y_true.is_empty() || y_pred.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    if y_true.len() != y_pred.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: y_true.len(),
            got: y_pred.len(),
        });
    }
    Ok(())
}
