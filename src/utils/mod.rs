//! Evaluation metrics, backtesting, and statistical helpers.

mod backtest;
mod metrics;
pub mod stats;

pub use backtest::{holdout_backtest, BacktestOutcome};
pub use metrics::{evaluate, mae, rmse, EvaluationReport, VariabilityBucket};
