//! GUI module - User interface components

mod app;
mod content_pane;
mod header;
mod menu_bar;

pub use app::DashboardApp;
pub use content_pane::{ContentPane, PaneAction};
pub use header::Header;
pub use menu_bar::MenuBar;
