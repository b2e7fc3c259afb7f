//! # industrial-forecast
//!
//! Anomaly detection and forecast backtesting for univariate industrial
//! sensor series.
//!
//! Provides a univariate [`core::TimeSeries`] with fixed-frequency
//! resampling and missing-value repair, a temporal train/test splitter,
//! lag-window construction for sequence models, two interchangeable
//! anomaly detectors (robust z-score and isolation forest), and a
//! forecast evaluator with error metrics plus a variability-capture
//! diagnostic. Concrete forecasting models plug in behind the narrow
//! [`models::Forecaster`] trait.

pub mod config;
pub mod core;
pub mod detection;
pub mod error;
pub mod io;
pub mod models;
pub mod transform;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::config::{load_config, PipelineConfig};
    pub use crate::core::{train_test_split, TimeSeries};
    pub use crate::detection::{detect_anomalies, AnomalyConfig, AnomalyMethod};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::Forecaster;
    pub use crate::utils::{evaluate, holdout_backtest, EvaluationReport, VariabilityBucket};
}
