//! Charts module - Chart model and rendering

pub mod palette;
mod plotter;
mod renderer;
mod spec;

pub use plotter::{series_color, ChartPlotter};
pub use renderer::{RenderError, StaticChartRenderer};
pub use spec::{CategorySeries, ChartBody, ChartSpec, NamedSeries};
