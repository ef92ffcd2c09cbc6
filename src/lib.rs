//! Economic Statistics Dashboard
//!
//! Loads a quarterly GDP growth series (or a synthetic stand-in), builds one
//! chart-and-insights page per menu item, and shows them in an egui window.

pub mod charts;
pub mod config;
pub mod content;
pub mod data;
pub mod export;
pub mod gui;
pub mod logging;
pub mod stats;

pub use config::AppConfig;
pub use content::{build_all_pages, build_page, DataContext, GrowthData, MenuState, Selection};
pub use data::{load_growth_series, LoadedSeries, LoaderError, SampleDatasets};
