//! TimeSeries data structure for representing temporal data.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// A univariate time series: one value per timestamp.
///
/// Timestamps are non-decreasing; missing observations are NaN. Instances
/// are immutable — every transformation returns a new series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series from already time-ordered data.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        for pair in timestamps.windows(2) {
            if pair[1] < pair[0] {
                return Err(ForecastError::Timestamp(
                    "timestamps must be non-decreasing".to_string(),
                ));
            }
        }
        Ok(Self { timestamps, values })
    }

    /// Create a series from unordered `(timestamp, value)` pairs.
    ///
    /// Pairs are stably sorted by timestamp, so rows sharing a timestamp
    /// keep their original relative order. This is the loader entry point:
    /// input files need not be pre-sorted.
    pub fn from_pairs(mut pairs: Vec<(DateTime<Utc>, f64)>) -> Result<Self> {
        pairs.sort_by_key(|(ts, _)| *ts);
        let (timestamps, values) = pairs.into_iter().unzip();
        Self::new(timestamps, values)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Check for missing values (NaN).
    pub fn has_missing_values(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    /// Extract the half-open range `[start, end)` as a new series.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end || end > self.len() {
            return Err(ForecastError::Configuration(format!(
                "invalid slice bounds {start}..{end} for series of length {}",
                self.len()
            )));
        }
        Ok(TimeSeries {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        })
    }

    /// Snap the series onto a fixed-frequency grid.
    ///
    /// The grid runs from the first to the last timestamp in steps of
    /// `freq`. Grid points without an observation become NaN; observations
    /// that do not fall on the grid are dropped; duplicate timestamps
    /// collapse to the last observation. The result is strictly increasing.
    pub fn resample(&self, freq: Duration) -> Result<TimeSeries> {
        if self.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        if freq <= Duration::zero() {
            return Err(ForecastError::Configuration(
                "resample frequency must be positive".to_string(),
            ));
        }

        let mut by_timestamp: HashMap<i64, f64> = HashMap::with_capacity(self.len());
        for (ts, &v) in self.timestamps.iter().zip(&self.values) {
            by_timestamp.insert(ts.timestamp_micros(), v);
        }

        let start = self.timestamps[0];
        let end = *self.timestamps.last().unwrap();
        let mut timestamps = Vec::new();
        let mut values = Vec::new();
        let mut current = start;
        while current <= end {
            timestamps.push(current);
            values.push(
                by_timestamp
                    .get(&current.timestamp_micros())
                    .copied()
                    .unwrap_or(f64::NAN),
            );
            current = current + freq;
        }

        Ok(TimeSeries { timestamps, values })
    }

    /// Repair missing values: interpolate, then backward-fill, then
    /// forward-fill.
    ///
    /// Linear interpolation fills interior gaps only; the backward fill
    /// then covers leading gaps and the forward fill trailing ones. The
    /// order is fixed — it determines which values reach the series
    /// boundaries. Fails if every value is missing.
    pub fn fill_missing(&self) -> Result<TimeSeries> {
        if self.is_empty() {
            return Err(ForecastError::EmptyData);
        }

        let mut values = interpolate_interior(&self.values);
        backward_fill(&mut values);
        forward_fill(&mut values);

        if values.iter().any(|v| v.is_nan()) {
            return Err(ForecastError::DataQuality(
                "all values missing after fill attempts".to_string(),
            ));
        }

        Ok(TimeSeries {
            timestamps: self.timestamps.clone(),
            values,
        })
    }
}

/// Linearly interpolate NaN runs that have valid values on both sides.
/// Leading and trailing runs are left untouched.
fn interpolate_interior(values: &[f64]) -> Vec<f64> {
    let mut result = values.to_vec();
    let n = result.len();

    let mut i = 0;
    while i < n {
        if !result[i].is_nan() {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < n && result[i].is_nan() {
            i += 1;
        }
        let run_end = i; // exclusive

        let left = if run_start > 0 {
            Some(result[run_start - 1])
        } else {
            None
        };
        let right = if run_end < n { Some(result[run_end]) } else { None };

        if let (Some(l), Some(r)) = (left, right) {
            let segments = (run_end - run_start + 1) as f64;
            for (step, idx) in (run_start..run_end).enumerate() {
                let t = (step + 1) as f64 / segments;
                result[idx] = l + t * (r - l);
            }
        }
    }

    result
}

/// Replace each NaN with the next valid value, scanning right to left.
fn backward_fill(values: &mut [f64]) {
    let mut next_valid = None;
    for v in values.iter_mut().rev() {
        if v.is_nan() {
            if let Some(fill) = next_valid {
                *v = fill;
            }
        } else {
            next_valid = Some(*v);
        }
    }
}

/// Replace each NaN with the previous valid value, scanning left to right.
fn forward_fill(values: &mut [f64]) {
    let mut last_valid = None;
    for v in values.iter_mut() {
        if v.is_nan() {
            if let Some(fill) = last_valid {
                *v = fill;
            }
        } else {
            last_valid = Some(*v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn make_timestamps(n: usize) -> Vec<DateTime<Utc>> {
        (0..n)
            .map(|i| Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(i as i64))
            .collect()
    }

    #[test]
    fn constructs_from_ordered_data() {
        let ts = TimeSeries::new(make_timestamps(5), vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        assert_eq!(ts.len(), 5);
        assert!(!ts.is_empty());
        assert_eq!(ts.values(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let result = TimeSeries::new(make_timestamps(3), vec![1.0, 2.0]);
        assert!(matches!(
            result,
            Err(ForecastError::DimensionMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn rejects_decreasing_timestamps() {
        let mut timestamps = make_timestamps(3);
        timestamps.swap(1, 2);
        let result = TimeSeries::new(timestamps, vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(ForecastError::Timestamp(_))));
    }

    #[test]
    fn from_pairs_sorts_by_timestamp() {
        let stamps = make_timestamps(3);
        let pairs = vec![
            (stamps[2], 30.0),
            (stamps[0], 10.0),
            (stamps[1], 20.0),
        ];

        let ts = TimeSeries::from_pairs(pairs).unwrap();
        assert_eq!(ts.values(), &[10.0, 20.0, 30.0]);
        assert_eq!(ts.timestamps(), &stamps[..]);
    }

    #[test]
    fn slice_returns_half_open_range() {
        let ts = TimeSeries::new(make_timestamps(5), vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        let mid = ts.slice(1, 4).unwrap();
        assert_eq!(mid.values(), &[2.0, 3.0, 4.0]);

        let empty = ts.slice(2, 2).unwrap();
        assert!(empty.is_empty());

        assert!(ts.slice(3, 2).is_err());
        assert!(ts.slice(0, 6).is_err());
    }

    #[test]
    fn resample_introduces_gaps_as_nan() {
        let stamps = make_timestamps(5);
        // Drop hour 2: hourly grid should reintroduce it as NaN.
        let ts = TimeSeries::new(
            vec![stamps[0], stamps[1], stamps[3], stamps[4]],
            vec![1.0, 2.0, 4.0, 5.0],
        )
        .unwrap();

        let resampled = ts.resample(Duration::hours(1)).unwrap();
        assert_eq!(resampled.len(), 5);
        assert_eq!(resampled.values()[1], 2.0);
        assert!(resampled.values()[2].is_nan());
        assert_eq!(resampled.values()[4], 5.0);
    }

    #[test]
    fn resample_collapses_duplicate_timestamps() {
        let stamps = make_timestamps(3);
        let ts = TimeSeries::new(
            vec![stamps[0], stamps[1], stamps[1], stamps[2]],
            vec![1.0, 2.0, 9.0, 3.0],
        )
        .unwrap();

        let resampled = ts.resample(Duration::hours(1)).unwrap();
        assert_eq!(resampled.len(), 3);
        // Last observation wins for the duplicated stamp.
        assert_eq!(resampled.values()[1], 9.0);
    }

    #[test]
    fn resample_rejects_non_positive_frequency() {
        let ts = TimeSeries::new(make_timestamps(3), vec![1.0, 2.0, 3.0]).unwrap();
        assert!(matches!(
            ts.resample(Duration::zero()),
            Err(ForecastError::Configuration(_))
        ));
    }

    #[test]
    fn fill_missing_interpolates_interior_gaps() {
        let ts = TimeSeries::new(
            make_timestamps(5),
            vec![1.0, f64::NAN, f64::NAN, 4.0, 5.0],
        )
        .unwrap();

        let filled = ts.fill_missing().unwrap();
        assert_relative_eq!(filled.values()[1], 2.0, epsilon = 1e-10);
        assert_relative_eq!(filled.values()[2], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn fill_missing_covers_leading_and_trailing_gaps() {
        let ts = TimeSeries::new(
            make_timestamps(5),
            vec![f64::NAN, f64::NAN, 3.0, 4.0, f64::NAN],
        )
        .unwrap();

        let filled = ts.fill_missing().unwrap();
        // Leading gaps backward-filled from the first valid value,
        // trailing gaps forward-filled from the last.
        assert_eq!(filled.values(), &[3.0, 3.0, 3.0, 4.0, 4.0]);
    }

    #[test]
    fn fill_missing_rejects_all_nan_series() {
        let ts = TimeSeries::new(make_timestamps(3), vec![f64::NAN; 3]).unwrap();
        assert!(matches!(
            ts.fill_missing(),
            Err(ForecastError::DataQuality(_))
        ));
    }

    #[test]
    fn fill_missing_is_identity_on_complete_series() {
        let ts = TimeSeries::new(make_timestamps(4), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let filled = ts.fill_missing().unwrap();
        assert_eq!(filled.values(), ts.values());
    }
}
