//! Forecasting model interface and baseline implementations.

mod baseline;
mod traits;

pub use baseline::{Naive, SimpleMovingAverage};
pub use traits::{BoxedForecaster, Forecaster};
