//! Baseline forecasting models.
//!
//! Cheap reference points for backtests: any serious model should beat
//! these on the same split before its numbers mean anything.

use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::stats;

/// Forecasts the last observed value for every future period.
#[derive(Debug, Clone, Default)]
pub struct Naive {
    last_value: Option<f64>,
}

impl Naive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Forecaster for Naive {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        if values.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        self.last_value = Some(*values.last().unwrap());
        Ok(())
    }

    fn forecast(&self, steps: usize) -> Result<Vec<f64>> {
        let last = self.last_value.ok_or(ForecastError::FitRequired)?;
        Ok(vec![last; steps])
    }

    fn name(&self) -> &str {
        "Naive"
    }

    fn is_fitted(&self) -> bool {
        self.last_value.is_some()
    }
}

/// Forecasts the mean of the last `window` observations for every future
/// period.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    window: usize,
    level: Option<f64>,
}

impl SimpleMovingAverage {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            level: None,
        }
    }
}

impl Forecaster for SimpleMovingAverage {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        if self.window == 0 {
            return Err(ForecastError::InvalidWindow(
                "moving average window must be positive".to_string(),
            ));
        }
        let values = series.values();
        if values.is_empty() {
            return Err(ForecastError::EmptyData);
        }

        let tail_start = values.len().saturating_sub(self.window);
        self.level = Some(stats::mean(&values[tail_start..]));
        Ok(())
    }

    fn forecast(&self, steps: usize) -> Result<Vec<f64>> {
        let level = self.level.ok_or(ForecastError::FitRequired)?;
        Ok(vec![level; steps])
    }

    fn name(&self) -> &str {
        "SimpleMovingAverage"
    }

    fn is_fitted(&self) -> bool {
        self.level.is_some()
    }
}
