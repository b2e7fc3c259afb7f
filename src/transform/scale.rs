//! Min-max scaling for sequence-model inputs.

use crate::error::{ForecastError, Result};

/// Scales values into [0, 1] using the range of the data it was fitted on.
///
/// Fit on the training split only, then apply the same parameters to the
/// test split — fitting on the full series would leak test-period range
/// information into training.
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    min: f64,
    range: f64,
}

impl MinMaxScaler {
    /// Learn scaling parameters from `values`. NaN entries are ignored;
    /// a constant input gets a unit range so `transform` maps it to 0.
    pub fn fit(values: &[f64]) -> Result<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Err(ForecastError::EmptyData);
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        Ok(Self {
            min,
            range: if range < 1e-10 { 1.0 } else { range },
        })
    }

    /// Scale values with the fitted parameters. NaN passes through.
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| (v - self.min) / self.range).collect()
    }

    /// Map scaled values back to the original units.
    pub fn inverse_transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| v * self.range + self.min).collect()
    }

    /// Fit on `values` and immediately transform them.
    pub fn fit_transform(values: &[f64]) -> Result<(Self, Vec<f64>)> {
        let scaler = Self::fit(values)?;
        let scaled = scaler.transform(values);
        Ok((scaler, scaled))
    }
}
