//! Error types for the industrial-forecast library.

use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while preparing, detecting, or evaluating series.
///
/// Every error is raised at the boundary where the precondition fails;
/// no component substitutes a default or emits partial results.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Bad or missing option, unknown strategy name, out-of-range ratio.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Mismatched lengths between paired sequences.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Non-positive lag window.
    #[error("invalid window: {0}")]
    InvalidWindow(String),

    /// Series unusable: all values missing after the fill chain, or
    /// degenerate variance where a ratio is required.
    #[error("data quality error: {0}")]
    DataQuality(String),

    /// Timestamp-related error (unparseable or inconsistent ordering).
    #[error("timestamp error: {0}")]
    Timestamp(String),

    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Model has not been fitted yet.
    #[error("model must be fitted before forecasting")]
    FitRequired,

    /// Underlying file I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing failure.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
