//! Typed pipeline configuration.
//!
//! Every recognized option is a struct field: parse errors name missing
//! keys, and `validate` checks ranges and names eagerly at load time, so
//! a bad configuration fails before any data is touched instead of at
//! first access deep inside the pipeline.

use crate::detection::{AnomalyConfig, AnomalyMethod};
use crate::error::{ForecastError, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Top-level configuration for the detection/backtest pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Input series options.
    pub data: DataConfig,
    /// Anomaly detection options.
    pub anomaly: AnomalyOptions,
}

/// Input series options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the raw CSV file.
    pub raw_path: String,
    /// Name of the timestamp column.
    pub datetime_col: String,
    /// Name of the value column.
    pub value_col: String,
    /// Optional fixed frequency (e.g. `"1h"`, `"15min"`); when set, the
    /// loaded series is resampled onto this grid.
    #[serde(default)]
    pub freq: Option<String>,
    /// Fraction of the series used for training, in (0, 1).
    pub train_ratio: f64,
}

/// Anomaly detection options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyOptions {
    /// Strategy name: `zscore` or `isolation_forest`.
    pub method: String,
    /// Expected fraction of anomalous points (isolation forest).
    #[serde(default = "default_contamination")]
    pub contamination: f64,
    /// Robust z-score cutoff.
    #[serde(default = "default_zscore_threshold")]
    pub zscore_threshold: f64,
}

fn default_contamination() -> f64 {
    0.03
}

fn default_zscore_threshold() -> f64 {
    3.0
}

impl PipelineConfig {
    /// Parse a YAML string and validate it.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(content)
            .map_err(|e| ForecastError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every option that has a constrained domain. Called by the
    /// loaders; standalone use covers configs built in code.
    pub fn validate(&self) -> Result<()> {
        if !self.data.train_ratio.is_finite()
            || self.data.train_ratio <= 0.0
            || self.data.train_ratio >= 1.0
        {
            return Err(ForecastError::Configuration(format!(
                "data.train_ratio must be in (0, 1), got {}",
                self.data.train_ratio
            )));
        }
        if self.data.datetime_col.is_empty() || self.data.value_col.is_empty() {
            return Err(ForecastError::Configuration(
                "data.datetime_col and data.value_col must be non-empty".to_string(),
            ));
        }
        if let Some(freq) = &self.data.freq {
            parse_frequency(freq)?;
        }

        AnomalyMethod::from_name(&self.anomaly.method)?;
        if !(0.0..=0.5).contains(&self.anomaly.contamination) {
            return Err(ForecastError::Configuration(format!(
                "anomaly.contamination must be in [0, 0.5], got {}",
                self.anomaly.contamination
            )));
        }
        if !(self.anomaly.zscore_threshold > 0.0) {
            return Err(ForecastError::Configuration(format!(
                "anomaly.zscore_threshold must be positive, got {}",
                self.anomaly.zscore_threshold
            )));
        }
        Ok(())
    }
}

impl AnomalyOptions {
    /// Resolve these options into a detector configuration.
    pub fn to_detector_config(&self) -> Result<AnomalyConfig> {
        Ok(AnomalyConfig {
            method: AnomalyMethod::from_name(&self.method)?,
            zscore_threshold: self.zscore_threshold,
            contamination: self.contamination,
            ..AnomalyConfig::default()
        })
    }
}

/// Load and validate a YAML configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let content = std::fs::read_to_string(&path)?;
    let config = PipelineConfig::from_yaml(&content)?;
    debug!(path = %path.as_ref().display(), "configuration loaded");
    Ok(config)
}

/// Parse a frequency string such as `"10s"`, `"15min"`, `"1h"`, `"d"`.
///
/// An optional integer multiplier precedes a unit from
/// {`s`, `m`/`min`, `h`, `d`, `w`}; a bare unit means a multiplier of 1.
pub fn parse_frequency(freq: &str) -> Result<Duration> {
    let normalized = freq.trim().to_lowercase();
    let split_at = normalized
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| {
            ForecastError::Configuration(format!("frequency `{freq}` is missing a unit"))
        })?;
    let (count, unit) = normalized.split_at(split_at);

    let count: i64 = if count.is_empty() {
        1
    } else {
        count.parse().map_err(|_| {
            ForecastError::Configuration(format!("invalid frequency multiplier in `{freq}`"))
        })?
    };
    if count == 0 {
        return Err(ForecastError::Configuration(format!(
            "frequency multiplier must be positive in `{freq}`"
        )));
    }

    let duration = match unit {
        "s" | "sec" => Duration::seconds(count),
        "m" | "min" => Duration::minutes(count),
        "h" => Duration::hours(count),
        "d" => Duration::days(count),
        "w" => Duration::weeks(count),
        other => {
            return Err(ForecastError::Configuration(format!(
                "unknown frequency unit `{other}` in `{freq}`"
            )))
        }
    };
    Ok(duration)
}
