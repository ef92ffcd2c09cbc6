//! Data Processor Module
//! Derived columns on the sample tables and the quarterly heatmap pivot.

use crate::data::series::Period;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' not found")]
    MissingColumn(String),
}

/// Year-by-quarter matrix built from (period, value) observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeatmapMatrix {
    /// Row labels, ascending.
    pub years: Vec<i32>,
    /// Column labels, always Q1..Q4.
    pub quarters: Vec<String>,
    /// `cells[row][col]`, `None` where no observation exists.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl HeatmapMatrix {
    pub fn get(&self, year: i32, quarter: u8) -> Option<f64> {
        let row = self.years.iter().position(|&y| y == year)?;
        let col = usize::from(quarter).checked_sub(1)?;
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Min and max over the filled cells.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Handles derived-column and pivot operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Pivot (period, value) observations into a year x quarter matrix.
    ///
    /// A repeated period keeps its last value.
    pub fn build_heatmap(observations: &[(Period, f64)]) -> HeatmapMatrix {
        let mut by_year: BTreeMap<i32, [Option<f64>; 4]> = BTreeMap::new();

        for (period, value) in observations {
            if !(1..=4).contains(&period.quarter) {
                continue;
            }
            let row = by_year.entry(period.year).or_insert([None; 4]);
            row[usize::from(period.quarter - 1)] = Some(*value);
        }

        HeatmapMatrix {
            years: by_year.keys().copied().collect(),
            quarters: (1..=4).map(|q| format!("Q{}", q)).collect(),
            cells: by_year.values().map(|row| row.to_vec()).collect(),
        }
    }

    /// Add `gender_gap = male - female`.
    pub fn with_gender_gap(
        df: &DataFrame,
        male_col: &str,
        female_col: &str,
    ) -> Result<DataFrame, ProcessorError> {
        Self::require(df, &[male_col, female_col])?;
        let result = df
            .clone()
            .lazy()
            .with_column((col(male_col) - col(female_col)).alias("gender_gap"))
            .collect()?;
        Ok(result)
    }

    /// Add trade balance and each side's share of total trade (percent).
    ///
    /// Expects `export` and `import` columns.
    pub fn with_trade_balance(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        Self::require(df, &["export", "import"])?;
        let total = col("export") + col("import");
        let result = df
            .clone()
            .lazy()
            .with_columns([
                (col("export") - col("import")).alias("balance"),
                (col("export") / total.clone() * lit(100.0)).alias("export_share"),
                (col("import") / total * lit(100.0)).alias("import_share"),
            ])
            .collect()?;
        Ok(result)
    }

    /// Add `realization_pct = realized / planned * 100`.
    pub fn with_realization(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        Self::require(df, &["planned", "realized"])?;
        let result = df
            .clone()
            .lazy()
            .with_column((col("realized") / col("planned") * lit(100.0)).alias("realization_pct"))
            .collect()?;
        Ok(result)
    }

    /// Numeric column as f64, nulls mapped to NaN.
    pub fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, ProcessorError> {
        Self::require(df, &[name])?;
        let column = df.column(name)?.cast(&DataType::Float64)?;
        let values = column
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        Ok(values)
    }

    /// Any column rendered as text labels (used for categorical x axes).
    pub fn label_column(df: &DataFrame, name: &str) -> Result<Vec<String>, ProcessorError> {
        Self::require(df, &[name])?;
        let column = df.column(name)?.cast(&DataType::String)?;
        let labels = column
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect();
        Ok(labels)
    }

    fn require(df: &DataFrame, names: &[&str]) -> Result<(), ProcessorError> {
        let present = df.get_column_names();
        for name in names {
            if !present.iter().any(|c| c.as_str() == *name) {
                return Err(ProcessorError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(year: i32, quarter: u8) -> Period {
        Period::new(year, quarter).unwrap()
    }

    #[test]
    fn heatmap_places_values_by_year_and_quarter() {
        let obs = vec![
            (p(2021, 2), 7.07),
            (p(2020, 1), 2.97),
            (p(2020, 4), -2.19),
            (p(2021, 1), -0.69),
            (p(2021, 1), -0.70),
        ];
        let m = DataProcessor::build_heatmap(&obs);

        assert_eq!(m.years, vec![2020, 2021]);
        assert_eq!(m.quarters, vec!["Q1", "Q2", "Q3", "Q4"]);
        assert_eq!(m.get(2020, 1), Some(2.97));
        assert_eq!(m.get(2020, 2), None);
        assert_eq!(m.get(2021, 1), Some(-0.70));
        assert_eq!(m.get(2022, 1), None);
        assert_eq!(m.value_range(), Some((-2.19, 7.07)));
    }

    #[test]
    fn empty_heatmap() {
        let m = DataProcessor::build_heatmap(&[]);
        assert!(m.is_empty());
        assert_eq!(m.value_range(), None);
    }

    #[test]
    fn gender_gap_column() {
        let df = df!(
            "year" => &[2022, 2023],
            "male" => &[76.0, 76.5],
            "female" => &[69.5, 70.1]
        )
        .unwrap();
        let out = DataProcessor::with_gender_gap(&df, "male", "female").unwrap();
        let gap = DataProcessor::f64_column(&out, "gender_gap").unwrap();
        assert!((gap[0] - 6.5).abs() < 1e-9);
        assert!((gap[1] - 6.4).abs() < 1e-9);
    }

    #[test]
    fn trade_shares_sum_to_hundred() {
        let df = df!(
            "year" => &[2023],
            "export" => &[258.8],
            "import" => &[221.9]
        )
        .unwrap();
        let out = DataProcessor::with_trade_balance(&df).unwrap();
        let balance = DataProcessor::f64_column(&out, "balance").unwrap();
        let ex = DataProcessor::f64_column(&out, "export_share").unwrap();
        let im = DataProcessor::f64_column(&out, "import_share").unwrap();
        assert!((balance[0] - 36.9).abs() < 1e-9);
        assert!((ex[0] + im[0] - 100.0).abs() < 1e-9);
        assert!(ex[0] > 50.0);
    }

    #[test]
    fn missing_column_is_reported() {
        let df = df!("export" => &[1.0]).unwrap();
        assert!(matches!(
            DataProcessor::with_trade_balance(&df),
            Err(ProcessorError::MissingColumn(c)) if c == "import"
        ));
    }

    #[test]
    fn labels_from_integer_column() {
        let df = df!("year" => &[2019, 2020]).unwrap();
        assert_eq!(
            DataProcessor::label_column(&df, "year").unwrap(),
            vec!["2019", "2020"]
        );
    }
}
