//! Time Series Module
//! Period labels and labelled numeric series.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid period label '{0}', expected 'YYYY Qn'")]
    Malformed(String),
    #[error("Quarter out of range in '{0}'")]
    QuarterOutOfRange(String),
}

/// A calendar quarter such as "2011 Q1".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Period {
    pub year: i32,
    pub quarter: u8,
}

impl Period {
    pub fn new(year: i32, quarter: u8) -> Result<Self, PeriodError> {
        if !(1..=4).contains(&quarter) {
            return Err(PeriodError::QuarterOutOfRange(format!("{} Q{}", year, quarter)));
        }
        Ok(Self { year, quarter })
    }

    /// Parse a label like "2011 Q1" (also accepts "2011Q1" and "2011-Q1").
    pub fn parse(label: &str) -> Result<Self, PeriodError> {
        let malformed = || PeriodError::Malformed(label.to_string());

        let upper = label.trim().to_ascii_uppercase();
        let (year_part, quarter_part) = upper.split_once('Q').ok_or_else(malformed)?;

        let year: i32 = year_part
            .trim()
            .trim_end_matches('-')
            .trim()
            .parse()
            .map_err(|_| malformed())?;
        let quarter: u8 = quarter_part.trim().parse().map_err(|_| malformed())?;

        if !(1..=4).contains(&quarter) {
            return Err(PeriodError::QuarterOutOfRange(label.to_string()));
        }
        Ok(Self { year, quarter })
    }

    /// The same quarter one year earlier.
    pub fn year_earlier(self) -> Self {
        Self {
            year: self.year - 1,
            quarter: self.quarter,
        }
    }

    /// The quarter immediately after this one.
    pub fn next(self) -> Self {
        if self.quarter == 4 {
            Self {
                year: self.year + 1,
                quarter: 1,
            }
        } else {
            Self {
                year: self.year,
                quarter: self.quarter + 1,
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Q{}", self.year, self.quarter)
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One observation in a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub period: String,
    pub value: f64,
}

/// Ordered (period label, value) observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn from_pairs<L: Into<String>>(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (L, f64)>,
    ) -> Self {
        Self {
            name: name.into(),
            points: pairs
                .into_iter()
                .map(|(period, value)| SeriesPoint {
                    period: period.into(),
                    value,
                })
                .collect(),
        }
    }

    pub fn push(&mut self, period: impl Into<String>, value: f64) {
        self.points.push(SeriesPoint {
            period: period.into(),
            value,
        });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.period.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Latest point with a finite value.
    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.iter().rev().find(|p| p.value.is_finite())
    }

    /// Points whose label parses as a quarter.
    pub fn quarterly_points(&self) -> Vec<(Period, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.period.parse::<Period>().ok().map(|period| (period, p.value)))
            .collect()
    }
}

/// Percentage change against the value `lag` steps earlier.
/// The first `lag` entries (and any with a zero or non-finite base) are NaN.
pub fn year_over_year(values: &[f64], lag: usize) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, &current)| {
            if lag == 0 || i < lag {
                return f64::NAN;
            }
            let base = values[i - lag];
            if base == 0.0 || !base.is_finite() || !current.is_finite() {
                f64::NAN
            } else {
                (current / base - 1.0) * 100.0
            }
        })
        .collect()
}

/// Percentage change against the previous quarter.
pub fn quarter_over_quarter(values: &[f64]) -> Vec<f64> {
    year_over_year(values, 1)
}
