//! Forecaster trait defining the common interface for all models.

use crate::core::TimeSeries;
use crate::error::Result;

/// Common interface for point forecasters.
///
/// The surface is deliberately narrow — fit on a training series, then
/// produce `steps` point forecasts — so ARIMA-style, sequence, or additive
/// models can all sit behind it without the backtester knowing which is
/// which. Object-safe, usable as `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit the model to the training series.
    fn fit(&mut self, series: &TimeSeries) -> Result<()>;

    /// Produce point forecasts for the next `steps` periods.
    fn forecast(&self, steps: usize) -> Result<Vec<f64>>;

    /// Model name for reports and logs.
    fn name(&self) -> &str;

    /// Whether `fit` has completed successfully.
    fn is_fitted(&self) -> bool;
}

/// Type alias for boxed forecaster trait objects.
pub type BoxedForecaster = Box<dyn Forecaster>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Naive;
    use chrono::{Duration, TimeZone, Utc};

    fn make_series(n: usize) -> TimeSeries {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let timestamps: Vec<_> = (0..n).map(|i| base + Duration::hours(i as i64)).collect();
        let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
        TimeSeries::new(timestamps, values).unwrap()
    }

    #[test]
    fn boxed_forecaster_fit_and_forecast() {
        let mut model: BoxedForecaster = Box::new(Naive::new());
        assert!(!model.is_fitted());

        model.fit(&make_series(10)).unwrap();
        assert!(model.is_fitted());

        let forecast = model.forecast(4).unwrap();
        assert_eq!(forecast.len(), 4);
        assert_eq!(model.name(), "Naive");
    }
}
