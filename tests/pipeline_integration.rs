//! End-to-end pipeline tests: CSV in, labels and forecasts out.

use industrial_forecast::config::load_config;
use industrial_forecast::core::TimeSeries;
use industrial_forecast::detection::{detect_anomalies, AnomalyConfig};
use industrial_forecast::io::{load_series, write_anomalies, write_forecast};
use industrial_forecast::models::Naive;
use industrial_forecast::utils::{holdout_backtest, VariabilityBucket};
use industrial_forecast::ForecastError;

use chrono::{Duration, TimeZone, Utc};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_sample_csv(path: &Path, rows: &[(&str, &str)]) {
    let mut content = String::from("timestamp,reading\n");
    for (ts, value) in rows {
        content.push_str(&format!("{ts},{value}\n"));
    }
    fs::write(path, content).unwrap();
}

#[test]
fn detect_pipeline_from_csv_to_labels_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sensor.csv");
    let output = dir.path().join("anomalies.csv");

    // 48 hourly readings around 20.0 with one obvious fault.
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut rows = Vec::new();
    let mut stamps = Vec::new();
    for i in 0..48 {
        let ts = (base + Duration::hours(i)).to_rfc3339();
        let value = if i == 30 {
            "250.0".to_string()
        } else {
            format!("{}", 20.0 + (i as f64 * 0.4).sin())
        };
        stamps.push(ts);
        rows.push(value);
    }
    let row_refs: Vec<(&str, &str)> = stamps
        .iter()
        .zip(&rows)
        .map(|(t, v)| (t.as_str(), v.as_str()))
        .collect();
    write_sample_csv(&input, &row_refs);

    let series = load_series(&input, "timestamp", "reading", None).unwrap();
    assert_eq!(series.len(), 48);

    let labels = detect_anomalies(series.values(), &AnomalyConfig::zscore(3.0)).unwrap();
    assert_eq!(labels.len(), 48);
    assert_eq!(labels[30], 1);
    assert_eq!(labels.iter().filter(|&&l| l == 1).count(), 1);

    write_anomalies(&output, &series, &labels).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "timestamp,value,anomaly");
    assert_eq!(lines.len(), 49);
    assert!(lines[31].ends_with(",1"));
}

#[test]
fn loader_sorts_rows_and_repairs_gaps() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("unsorted.csv");

    // Out of order, with hour 2 missing entirely and hour 4 blank.
    write_sample_csv(
        &input,
        &[
            ("2024-01-01 03:00:00", "4.0"),
            ("2024-01-01 00:00:00", "1.0"),
            ("2024-01-01 04:00:00", ""),
            ("2024-01-01 01:00:00", "2.0"),
            ("2024-01-01 05:00:00", "6.0"),
        ],
    );

    let series = load_series(&input, "timestamp", "reading", Some("1h")).unwrap();

    assert_eq!(series.len(), 6);
    assert!(!series.has_missing_values());
    // Hour 2 interpolated between 2.0 and 4.0; hour 4 between 4.0 and 6.0.
    assert_eq!(series.values(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn backtest_pipeline_from_csv_to_forecast_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sensor.csv");
    let output = dir.path().join("forecast.csv");

    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let stamps: Vec<String> = (0..30).map(|i| (base + Duration::hours(i)).to_rfc3339()).collect();
    let values: Vec<String> = (0..30)
        .map(|i| format!("{}", 50.0 + (i as f64 * 0.9).sin() * 5.0))
        .collect();
    let rows: Vec<(&str, &str)> = stamps
        .iter()
        .zip(&values)
        .map(|(t, v)| (t.as_str(), v.as_str()))
        .collect();
    write_sample_csv(&input, &rows);

    let series = load_series(&input, "timestamp", "reading", None).unwrap();
    let mut model = Naive::new();
    let outcome = holdout_backtest(&series, 0.8, &mut model).unwrap();

    assert_eq!(outcome.y_true.len(), 6);
    assert!(outcome.report.mae >= 0.0);
    assert!(outcome.report.rmse >= outcome.report.mae);
    // A constant forecast cannot track a sine wave's variability.
    assert_eq!(outcome.report.bucket, VariabilityBucket::UnderVariable);

    write_forecast(&output, &outcome).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "timestamp,y_true,y_pred");
    assert_eq!(lines.len(), 7);
}

#[test]
fn both_detectors_flag_the_same_obvious_fault() {
    let mut values: Vec<f64> = (0..120).map(|i| 100.0 + (i as f64 * 0.25).cos() * 2.0).collect();
    values[77] = 900.0;

    let zscore = detect_anomalies(&values, &AnomalyConfig::zscore(3.0)).unwrap();
    let forest = detect_anomalies(&values, &AnomalyConfig::isolation_forest(0.01)).unwrap();

    assert_eq!(zscore[77], 1);
    assert_eq!(forest[77], 1);
    assert_eq!(zscore.len(), forest.len());
}

#[test]
fn config_file_drives_detection() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("pipeline.yaml");
    let data_path = dir.path().join("series.csv");

    write_sample_csv(
        &data_path,
        &[
            ("2024-01-01 00:00:00", "10.0"),
            ("2024-01-01 01:00:00", "10.1"),
            ("2024-01-01 02:00:00", "9.9"),
            ("2024-01-01 03:00:00", "10.0"),
            ("2024-01-01 04:00:00", "99.0"),
            ("2024-01-01 05:00:00", "10.2"),
        ],
    );

    fs::write(
        &config_path,
        format!(
            "data:\n  raw_path: {}\n  datetime_col: timestamp\n  value_col: reading\n  train_ratio: 0.8\nanomaly:\n  method: zscore\n  zscore_threshold: 3.0\n",
            data_path.display()
        ),
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let series = load_series(
        &config.data.raw_path,
        &config.data.datetime_col,
        &config.data.value_col,
        config.data.freq.as_deref(),
    )
    .unwrap();
    let detector = config.anomaly.to_detector_config().unwrap();
    let labels = detect_anomalies(series.values(), &detector).unwrap();

    assert_eq!(labels, vec![0, 0, 0, 0, 1, 0]);
}

#[test]
fn misconfigured_method_fails_before_touching_data() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("pipeline.yaml");

    fs::write(
        &config_path,
        "data:\n  raw_path: nowhere.csv\n  datetime_col: ts\n  value_col: y\n  train_ratio: 0.8\nanomaly:\n  method: autoencoder\n",
    )
    .unwrap();

    match load_config(&config_path) {
        Err(ForecastError::Configuration(msg)) => assert!(msg.contains("autoencoder")),
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn missing_value_column_is_reported_by_name() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("series.csv");
    write_sample_csv(&input, &[("2024-01-01 00:00:00", "1.0")]);

    match load_series(&input, "timestamp", "temperature", None) {
        Err(ForecastError::Configuration(msg)) => assert!(msg.contains("temperature")),
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn written_anomaly_labels_must_align_with_series() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("anomalies.csv");

    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let series = TimeSeries::new(
        (0..3).map(|i| base + Duration::hours(i)).collect(),
        vec![1.0, 2.0, 3.0],
    )
    .unwrap();

    let result = write_anomalies(&output, &series, &[0, 1]);
    assert!(matches!(
        result,
        Err(ForecastError::DimensionMismatch { expected: 3, got: 2 })
    ));
}
