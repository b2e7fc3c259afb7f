//! CSV ingestion and emission for series, labels, and forecasts.

use crate::config::parse_frequency;
use crate::core::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::utils::BacktestOutcome;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::path::Path;
use tracing::info;

/// Load a univariate series from a CSV file with named columns.
///
/// Rows need not be pre-sorted; they are ordered by timestamp before the
/// series is built. Empty value cells become NaN. When `freq` is given
/// the series is snapped onto that grid; whenever missing values are
/// present after loading (blank cells or resampling gaps) the
/// interpolate → backward-fill → forward-fill chain repairs them.
pub fn load_series<P: AsRef<Path>>(
    path: P,
    datetime_col: &str,
    value_col: &str,
    freq: Option<&str>,
) -> Result<TimeSeries> {
    let mut reader = csv::Reader::from_path(&path)?;

    let headers = reader.headers()?.clone();
    let ts_idx = column_index(&headers, datetime_col)?;
    let val_idx = column_index(&headers, value_col)?;

    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = record.position().map(|p| p.line()).unwrap_or_default();

        let ts_field = record.get(ts_idx).unwrap_or_default();
        let timestamp = parse_timestamp(ts_field)?;

        let val_field = record.get(val_idx).unwrap_or_default().trim();
        let value = if val_field.is_empty() {
            f64::NAN
        } else {
            val_field.parse::<f64>().map_err(|_| {
                ForecastError::DataQuality(format!(
                    "unparseable value `{val_field}` in column `{value_col}` at line {row}"
                ))
            })?
        };

        pairs.push((timestamp, value));
    }

    if pairs.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    let mut series = TimeSeries::from_pairs(pairs)?;
    if let Some(freq) = freq {
        series = series.resample(parse_frequency(freq)?)?;
    }
    if series.has_missing_values() {
        series = series.fill_missing()?;
    }

    info!(
        path = %path.as_ref().display(),
        rows = series.len(),
        "series loaded"
    );
    Ok(series)
}

/// Write per-point anomaly labels next to the original values.
///
/// Columns: `timestamp,value,anomaly`, one row per input point in input
/// order, labels 0/1 aligned with the series.
pub fn write_anomalies<P: AsRef<Path>>(
    path: P,
    series: &TimeSeries,
    labels: &[u8],
) -> Result<()> {
    if labels.len() != series.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: series.len(),
            got: labels.len(),
        });
    }

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["timestamp", "value", "anomaly"])?;
    for ((ts, value), label) in series
        .timestamps()
        .iter()
        .zip(series.values())
        .zip(labels)
    {
        writer.write_record([ts.to_rfc3339(), value.to_string(), label.to_string()])?;
    }
    writer.flush()?;

    info!(path = %path.as_ref().display(), rows = labels.len(), "anomaly labels written");
    Ok(())
}

/// Write a backtest's paired observed/predicted values, indexed by the
/// test-period timestamps. Columns: `timestamp,y_true,y_pred`.
pub fn write_forecast<P: AsRef<Path>>(path: P, outcome: &BacktestOutcome) -> Result<()> {
    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["timestamp", "y_true", "y_pred"])?;
    for ((ts, y_true), y_pred) in outcome
        .timestamps
        .iter()
        .zip(&outcome.y_true)
        .zip(&outcome.y_pred)
    {
        writer.write_record([ts.to_rfc3339(), y_true.to_string(), y_pred.to_string()])?;
    }
    writer.flush()?;

    info!(path = %path.as_ref().display(), rows = outcome.y_true.len(), "forecast written");
    Ok(())
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| {
            let available: Vec<&str> = headers.iter().collect();
            ForecastError::Configuration(format!(
                "column `{name}` not found; file has columns {available:?}"
            ))
        })
}

/// Parse a timestamp in RFC 3339 or one of the common plain formats.
fn parse_timestamp(field: &str) -> Result<DateTime<Utc>> {
    let field = field.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(field) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(field, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(field, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap()));
    }
    Err(ForecastError::Timestamp(format!(
        "unparseable timestamp `{field}`"
    )))
}
