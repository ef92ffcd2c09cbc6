//! Economic Statistics Dashboard - desktop entry point.

use anyhow::Context;
use eframe::egui;
use econ_dashboard::gui::DashboardApp;
use econ_dashboard::{logging, AppConfig};

fn main() -> anyhow::Result<()> {
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    logging::init_logger(&config.logging.level);
    tracing::info!(
        config = %config_path.display(),
        csv = %config.data.growth_csv.display(),
        "starting dashboard"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([1000.0, 650.0])
            .with_title(config.window.title.clone()),
        ..Default::default()
    };

    let title = config.window.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}
