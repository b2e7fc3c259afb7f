//! Transforms that prepare series for sequence models.

mod rolling;
mod scale;
mod supervised;

pub use rolling::{rolling_features, rolling_mean, rolling_std, RollingFeatures};
pub use scale::MinMaxScaler;
pub use supervised::{make_supervised, to_design_matrix, SupervisedSample};
