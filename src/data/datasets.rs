//! Sample Datasets
//! Small in-memory tables standing in for the published statistics.

use crate::data::series::{Period, TimeSeries};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const INFLATION_SEED: u64 = 2024;
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// GDP growth y-o-y (%) per (year, quarter).
const GDP_QUARTERLY_GROWTH: [(i32, u8, f64); 24] = [
    (2019, 1, 5.06),
    (2019, 2, 5.05),
    (2019, 3, 5.01),
    (2019, 4, 4.96),
    (2020, 1, 2.97),
    (2020, 2, -5.32),
    (2020, 3, -3.49),
    (2020, 4, -2.17),
    (2021, 1, -0.70),
    (2021, 2, 7.07),
    (2021, 3, 3.51),
    (2021, 4, 5.02),
    (2022, 1, 5.02),
    (2022, 2, 5.46),
    (2022, 3, 5.73),
    (2022, 4, 5.01),
    (2023, 1, 5.04),
    (2023, 2, 5.17),
    (2023, 3, 4.94),
    (2023, 4, 5.04),
    (2024, 1, 5.11),
    (2024, 2, 5.05),
    (2024, 3, 4.95),
    (2024, 4, 5.02),
];

/// GDP at constant prices (ADHK), trillion Rupiah, 2022 Q1 onwards.
const GDP_ADHK_QUARTERLY: [f64; 12] = [
    2818.6, 2923.7, 3005.2, 2962.9, 2961.2, 3075.8, 3124.9, 3139.1, 3112.4, 3231.0, 3279.6,
    3297.0,
];

/// All sample tables, built once at start-up.
#[derive(Debug, Clone)]
pub struct SampleDatasets {
    /// (period, y-o-y growth) tuples for the quarterly heatmap.
    pub gdp_quarterly_growth: Vec<(Period, f64)>,
    /// Quarterly ADHK levels.
    pub gdp_constant_quarterly: TimeSeries,
    /// year, adhb, adhk
    pub gdp_annual: DataFrame,
    /// Monthly y-o-y inflation.
    pub inflation: TimeSeries,
    /// group, inflation
    pub cpi_groups: DataFrame,
    /// year, export, import
    pub trade: DataFrame,
    /// item, planned, realized
    pub budget: DataFrame,
    /// year, unemployment, participation
    pub employment: DataFrame,
    /// year, rate, gini, urban, rural
    pub poverty: DataFrame,
    /// year, total, male, female
    pub ipm: DataFrame,
}

impl SampleDatasets {
    pub fn build() -> PolarsResult<Self> {
        let gdp_quarterly_growth = GDP_QUARTERLY_GROWTH
            .iter()
            .filter_map(|&(year, quarter, value)| {
                Period::new(year, quarter).ok().map(|p| (p, value))
            })
            .collect();

        let mut period = Period {
            year: 2022,
            quarter: 1,
        };
        let mut gdp_constant_quarterly = TimeSeries::new("PDB ADHK (trillion Rp)");
        for value in GDP_ADHK_QUARTERLY {
            gdp_constant_quarterly.push(period.to_string(), value);
            period = period.next();
        }

        let gdp_annual = df!(
            "year" => &[2019, 2020, 2021, 2022, 2023, 2024],
            "adhb" => &[15833.9, 15443.4, 16976.8, 19588.4, 20892.4, 22139.0],
            "adhk" => &[10949.2, 10722.4, 11120.1, 11710.4, 12301.4, 12920.8]
        )?;

        let cpi_groups = df!(
            "group" => &[
                "Food & beverages",
                "Clothing",
                "Housing & utilities",
                "Health",
                "Transport",
                "Education",
                "Personal care",
            ],
            "inflation" => &[3.56, 1.05, 0.48, 1.83, 0.49, 1.77, 7.10]
        )?;

        let trade = df!(
            "year" => &[2019, 2020, 2021, 2022, 2023, 2024],
            "export" => &[167.7, 163.2, 231.5, 292.0, 258.8, 264.7],
            "import" => &[171.3, 141.6, 196.2, 237.4, 221.9, 233.7]
        )?;

        let budget = df!(
            "item" => &[
                "Tax revenue",
                "Non-tax revenue",
                "Grants",
                "Central spending",
                "Regional transfers",
            ],
            "planned" => &[1988.9, 492.0, 0.4, 2467.5, 857.6],
            "realized" => &[1932.4, 579.5, 1.3, 2486.6, 863.5]
        )?;

        let employment = df!(
            "year" => &[2019, 2020, 2021, 2022, 2023, 2024],
            "unemployment" => &[5.23, 7.07, 6.49, 5.86, 5.32, 4.91],
            "participation" => &[69.21, 67.77, 67.80, 68.63, 69.48, 70.63]
        )?;

        let poverty = df!(
            "year" => &[2019, 2020, 2021, 2022, 2023, 2024],
            "rate" => &[9.22, 10.19, 9.71, 9.57, 9.36, 9.03],
            "gini" => &[0.380, 0.385, 0.381, 0.381, 0.388, 0.381],
            "urban" => &[6.56, 7.88, 7.60, 7.53, 7.29, 7.09],
            "rural" => &[12.60, 13.20, 12.53, 12.36, 12.22, 11.34]
        )?;

        let ipm = df!(
            "year" => &[2019, 2020, 2021, 2022, 2023, 2024],
            "total" => &[71.92, 71.94, 72.29, 72.91, 73.55, 74.20],
            "male" => &[75.96, 75.98, 76.25, 76.73, 77.22, 77.76],
            "female" => &[69.18, 69.19, 69.59, 70.31, 70.93, 71.68]
        )?;

        Ok(Self {
            gdp_quarterly_growth,
            gdp_constant_quarterly,
            gdp_annual,
            inflation: synthetic_inflation(),
            cpi_groups,
            trade,
            budget,
            employment,
            poverty,
            ipm,
        })
    }
}

/// Seeded monthly inflation for 2024 drifting around 2.5%.
fn synthetic_inflation() -> TimeSeries {
    let mut rng = StdRng::seed_from_u64(INFLATION_SEED);
    let mut series = TimeSeries::new("Inflation (y-o-y, %)");
    let mut level: f64 = 2.6;
    for month in MONTHS {
        level = (level + rng.gen_range(-0.3..0.25)).clamp(1.0, 4.0);
        series.push(format!("{} 2024", month), (level * 100.0).round() / 100.0);
    }
    series
}
