//! Holdout backtesting of point forecasters.

use crate::core::{train_test_split, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::metrics::{evaluate, EvaluationReport};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Result of a holdout backtest: paired observed/predicted values over
/// the test period, and their evaluation.
#[derive(Debug, Clone)]
pub struct BacktestOutcome {
    /// Timestamps of the test period, in order.
    pub timestamps: Vec<DateTime<Utc>>,
    /// Observed values over the test period.
    pub y_true: Vec<f64>,
    /// Forecast values, aligned with `y_true`.
    pub y_pred: Vec<f64>,
    /// Metrics and variability diagnostic.
    pub report: EvaluationReport,
}

/// Fit a forecaster on the training prefix and score it over the test
/// suffix.
///
/// The split must leave both sides non-empty: there is nothing to fit on
/// or nothing to score otherwise, and silently returning an empty outcome
/// would read as a perfect backtest.
pub fn holdout_backtest(
    series: &TimeSeries,
    train_ratio: f64,
    model: &mut dyn Forecaster,
) -> Result<BacktestOutcome> {
    let (train, test) = train_test_split(series, train_ratio)?;
    if train.is_empty() || test.is_empty() {
        return Err(ForecastError::DataQuality(format!(
            "split left {} training and {} test observations; both must be non-empty",
            train.len(),
            test.len()
        )));
    }
    debug!(
        model = model.name(),
        train = train.len(),
        test = test.len(),
        "fitting for holdout backtest"
    );

    model.fit(&train)?;
    let y_pred = model.forecast(test.len())?;
    if y_pred.len() != test.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: test.len(),
            got: y_pred.len(),
        });
    }

    let y_true = test.values().to_vec();
    let report = evaluate(&y_true, &y_pred)?;
    info!(
        model = model.name(),
        mae = report.mae,
        rmse = report.rmse,
        variability_ratio = report.variability_ratio,
        "holdout backtest complete"
    );

    Ok(BacktestOutcome {
        timestamps: test.timestamps().to_vec(),
        y_true,
        y_pred,
        report,
    })
}
