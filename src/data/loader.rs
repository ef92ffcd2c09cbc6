//! CSV Data Loader Module
//! Loads the quarterly GDP growth series using Polars, falling back to a
//! synthetic series when the file is absent.

use crate::data::series::{Period, TimeSeries};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FALLBACK_SEED: u64 = 2011;
const FALLBACK_START: Period = Period {
    year: 2011,
    quarter: 1,
};
const FALLBACK_QUARTERS: usize = 56;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Expected at least 2 columns (period, growth), found {0}")]
    ColumnCount(usize),
}

/// Where the loaded series came from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    File(PathBuf),
    Fallback { notice: String },
}

/// Result of a successful load: the series plus its provenance.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub series: TimeSeries,
    pub source: DataSource,
}

impl LoadedSeries {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, DataSource::Fallback { .. })
    }

    /// Warning text to show when the fallback series is in use.
    pub fn notice(&self) -> Option<&str> {
        match &self.source {
            DataSource::Fallback { notice } => Some(notice),
            DataSource::File(_) => None,
        }
    }
}

/// Load the growth series from `path`.
///
/// A missing file is not an error: the synthetic series is returned with a
/// notice. Any other failure is reported to the caller.
pub fn load_growth_series(path: &Path) -> Result<LoadedSeries, LoaderError> {
    match std::fs::metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "growth CSV not found, using synthetic series");
            return Ok(LoadedSeries {
                series: fallback_series(),
                source: DataSource::Fallback {
                    notice: format!(
                        "File {} not found. Showing synthetic sample data.",
                        path.display()
                    ),
                },
            });
        }
        Err(source) => {
            return Err(LoaderError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .finish()?
        .collect()?;

    let series = series_from_dataframe(&df)?;
    tracing::info!(
        path = %path.display(),
        rows = series.len(),
        "loaded growth series"
    );

    Ok(LoadedSeries {
        series,
        source: DataSource::File(path.to_path_buf()),
    })
}

/// Treat the first two columns as (period, growth) whatever their header says.
///
/// Rows with an empty period are dropped; a missing growth value becomes NaN.
pub fn series_from_dataframe(df: &DataFrame) -> Result<TimeSeries, LoaderError> {
    let columns = df.get_columns();
    if columns.len() < 2 {
        return Err(LoaderError::ColumnCount(columns.len()));
    }

    let period = columns[0].cast(&DataType::String)?;
    let growth = columns[1].cast(&DataType::Float64)?;
    let period_ca = period.str()?;
    let growth_ca = growth.f64()?;

    let mut series = TimeSeries::new("GDP growth (y-o-y, %)");
    for i in 0..df.height() {
        let Some(label) = period_ca.get(i).map(str::trim).filter(|l| !l.is_empty()) else {
            continue;
        };
        series.push(label, growth_ca.get(i).unwrap_or(f64::NAN));
    }

    Ok(series)
}

/// Deterministic synthetic quarterly growth series, 2011 Q1 to 2024 Q4.
pub fn fallback_series() -> TimeSeries {
    let mut rng = StdRng::seed_from_u64(FALLBACK_SEED);
    let mut series = TimeSeries::new("GDP growth (y-o-y, %, synthetic)");

    let mut period = FALLBACK_START;
    for _ in 0..FALLBACK_QUARTERS {
        let baseline = match period.year {
            2020 => match period.quarter {
                1 => 2.9,
                2 => -5.3,
                3 => -3.5,
                _ => -2.2,
            },
            2021 if period.quarter == 1 => -0.7,
            2021 if period.quarter == 2 => 7.1,
            y if y < 2015 => 5.8,
            _ => 5.0,
        };
        let noise: f64 = rng.gen_range(-0.35..0.35);
        let value = ((baseline + noise) * 100.0).round() / 100.0;
        series.push(period.to_string(), value);
        period = period.next();
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_deterministic_and_quarterly() {
        let a = fallback_series();
        let b = fallback_series();
        assert_eq!(a, b);
        assert_eq!(a.len(), FALLBACK_QUARTERS);
        assert_eq!(a.points[0].period, "2011 Q1");
        assert_eq!(a.points[FALLBACK_QUARTERS - 1].period, "2024 Q4");
        assert_eq!(a.quarterly_points().len(), FALLBACK_QUARTERS);
    }

    #[test]
    fn renames_first_two_columns() {
        let df = df!(
            "Triwulan" => &["2020 Q1", "2020 Q2", ""],
            "Pertumbuhan" => &[Some(2.97), None, Some(1.0)],
            "extra" => &[1, 2, 3]
        )
        .unwrap();

        let series = series_from_dataframe(&df).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].period, "2020 Q1");
        assert!((series.points[0].value - 2.97).abs() < 1e-9);
        assert!(series.points[1].value.is_nan());
    }

    #[test]
    fn single_column_is_rejected() {
        let df = df!("only" => &["2020 Q1"]).unwrap();
        assert!(matches!(
            series_from_dataframe(&df),
            Err(LoaderError::ColumnCount(1))
        ));
    }
}
