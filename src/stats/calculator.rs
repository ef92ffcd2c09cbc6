//! Statistics Calculator Module
//! Descriptive statistics and trend for labelled series.

use crate::data::TimeSeries;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::HashMap;

/// Slopes smaller than this (per period) count as flat.
pub const FLAT_TREND_THRESHOLD: f64 = 0.01;

/// Summary of one labelled series, computed over its finite values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub min_at: Option<String>,
    pub max_at: Option<String>,
    pub latest: Option<f64>,
    pub latest_at: Option<String>,
    pub previous: Option<f64>,
    /// latest - previous
    pub change: Option<f64>,
    /// Least-squares slope per period.
    pub trend: f64,
}

impl Default for SeriesSummary {
    fn default() -> Self {
        Self {
            name: String::new(),
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            min_at: None,
            max_at: None,
            latest: None,
            latest_at: None,
            previous: None,
            change: None,
            trend: f64::NAN,
        }
    }
}

/// Direction of a series' trend line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Rising,
    Falling,
    Flat,
}

impl SeriesSummary {
    pub fn trend_direction(&self) -> TrendDirection {
        if !self.trend.is_finite() || self.trend.abs() < FLAT_TREND_THRESHOLD {
            TrendDirection::Flat
        } else if self.trend > 0.0 {
            TrendDirection::Rising
        } else {
            TrendDirection::Falling
        }
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarize a series given as parallel label/value slices.
    ///
    /// Non-finite values are skipped; labels beyond the value count are ignored.
    pub fn summarize(name: &str, labels: &[String], values: &[f64]) -> SeriesSummary {
        let finite: Vec<(usize, f64)> = values
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .collect();

        if finite.is_empty() {
            return SeriesSummary {
                name: name.to_string(),
                ..SeriesSummary::default()
            };
        }

        let label_at = |idx: usize| labels.get(idx).cloned();
        let only_values: Vec<f64> = finite.iter().map(|&(_, v)| v).collect();

        let mean = Statistics::mean(only_values.iter());
        let std = if only_values.len() > 1 {
            Statistics::std_dev(only_values.iter())
        } else {
            0.0
        };

        let mut sorted = only_values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = Self::percentile(&sorted, 50.0);

        let (min_idx, min) = finite
            .iter()
            .copied()
            .fold(finite[0], |acc, x| if x.1 < acc.1 { x } else { acc });
        let (max_idx, max) = finite
            .iter()
            .copied()
            .fold(finite[0], |acc, x| if x.1 > acc.1 { x } else { acc });

        let (latest_idx, latest) = finite[finite.len() - 1];
        let previous = finite.len().checked_sub(2).map(|i| finite[i].1);

        SeriesSummary {
            name: name.to_string(),
            count: finite.len(),
            mean,
            median,
            std,
            min,
            max,
            min_at: label_at(min_idx),
            max_at: label_at(max_idx),
            latest: Some(latest),
            latest_at: label_at(latest_idx),
            previous,
            change: previous.map(|p| latest - p),
            trend: Self::trend_slope(&finite),
        }
    }

    pub fn summarize_series(series: &TimeSeries) -> SeriesSummary {
        Self::summarize(&series.name, &series.labels(), &series.values())
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Ordinary least-squares slope of value against position.
    fn trend_slope(points: &[(usize, f64)]) -> f64 {
        let n = points.len() as f64;
        if points.len() < 2 {
            return 0.0;
        }

        let mean_x = points.iter().map(|&(x, _)| x as f64).sum::<f64>() / n;
        let mean_y = points.iter().map(|&(_, y)| y).sum::<f64>() / n;

        let (num, den) = points.iter().fold((0.0, 0.0), |(num, den), &(x, y)| {
            let dx = x as f64 - mean_x;
            (num + dx * (y - mean_y), den + dx * dx)
        });

        if den == 0.0 {
            0.0
        } else {
            num / den
        }
    }

    /// Summarize many series in parallel, keyed by series name.
    pub fn summarize_all_parallel(series: &[TimeSeries]) -> HashMap<String, SeriesSummary> {
        series
            .par_iter()
            .map(|s| (s.name.clone(), Self::summarize_series(s)))
            .collect()
    }
}
