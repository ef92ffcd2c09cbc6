//! Data module - CSV loading, sample tables and derived columns

mod datasets;
mod loader;
mod processor;
mod series;

pub use datasets::SampleDatasets;
pub use loader::{fallback_series, load_growth_series, DataSource, LoadedSeries, LoaderError};
pub use processor::{DataProcessor, HeatmapMatrix, ProcessorError};
pub use series::{quarter_over_quarter, year_over_year, Period, PeriodError, SeriesPoint, TimeSeries};
