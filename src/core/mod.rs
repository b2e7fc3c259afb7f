//! Core data structures for univariate time series.

mod split;
mod time_series;

pub use split::train_test_split;
pub use time_series::TimeSeries;
