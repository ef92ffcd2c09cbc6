//! Dashboard Main Application
//! Header, menus, and the content pane for the selected page.

use crate::config::AppConfig;
use crate::content::{
    build_all_pages, DataContext, GrowthData, MenuState, PageContent, Selection,
};
use crate::data::SampleDatasets;
use crate::export::{self, ExportError};
use crate::gui::{ContentPane, Header, MenuBar, PaneAction};
use egui::{Color32, RichText};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

/// Data loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(HashMap<Selection, PageContent>),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: AppConfig,
    header: Header,
    menu: MenuState,
    pages: HashMap<Selection, PageContent>,
    status: String,

    // Async loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let header = Header::new(&cc.egui_ctx, &config.header);
        let mut app = Self {
            config,
            header,
            menu: MenuState::default(),
            pages: HashMap::new(),
            status: "Ready".to_string(),
            load_rx: None,
            is_loading: false,
        };
        app.start_loading();
        app
    }

    /// Load the CSV and build all pages in a background thread
    fn start_loading(&mut self) {
        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.is_loading = true;
        self.status = "Loading data...".to_string();

        let csv_path = self.config.data.growth_csv.clone();
        thread::spawn(move || {
            Self::run_loading(tx, csv_path);
        });
    }

    /// Run loading (called from background thread)
    fn run_loading(tx: Sender<LoadResult>, csv_path: PathBuf) {
        let _ = tx.send(LoadResult::Progress(format!(
            "Reading {}...",
            csv_path.display()
        )));

        let growth = GrowthData::load(&csv_path);

        let datasets = match SampleDatasets::build() {
            Ok(ds) => ds,
            Err(e) => {
                let _ = tx.send(LoadResult::Error(e.to_string()));
                return;
            }
        };

        let _ = tx.send(LoadResult::Progress("Building pages...".to_string()));
        let pages = build_all_pages(&DataContext { growth, datasets });
        let _ = tx.send(LoadResult::Complete(pages));
    }

    /// Check for loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            loop {
                let result = match rx.try_recv() {
                    Ok(result) => result,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        if self.is_loading {
                            tracing::error!("loader thread exited without a result");
                            self.status = "Error: data loading stopped unexpectedly".to_string();
                            self.is_loading = false;
                        }
                        should_keep_receiver = false;
                        break;
                    }
                };

                match result {
                    LoadResult::Progress(status) => {
                        self.status = status;
                    }
                    LoadResult::Complete(pages) => {
                        self.status = format!("Loaded {} pages", pages.len());
                        self.pages = pages;
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.status = format!("Error: {}", error);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Ask for a destination and export the current page
    fn handle_export(&mut self, action: PaneAction) {
        let selection = self.menu.selection();
        let Some(page) = self.pages.get(&selection) else {
            return;
        };

        let (filter, ext) = match action {
            PaneAction::ExportPng => ("PNG Image", "png"),
            PaneAction::ExportJson => ("JSON", "json"),
            PaneAction::None => return,
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter(filter, &[ext])
            .set_file_name(export::suggested_file_name(selection, ext))
            .save_file()
        else {
            return; // User cancelled
        };

        let result = match action {
            PaneAction::ExportPng => export::export_chart_png(page, &path, &self.config.export),
            _ => export::export_page_json(page, &path),
        };

        if let Some(written) = self.finish_export(&path, result) {
            if let Err(e) = open::that(&written) {
                tracing::warn!(path = %written.display(), error = %e, "could not open exported file");
            }
        }
    }

    /// Update the status line. Returns the file to open, if any.
    fn finish_export(
        &mut self,
        requested: &Path,
        result: Result<PathBuf, ExportError>,
    ) -> Option<PathBuf> {
        match result {
            Ok(written) => {
                self.status = format!("Exported {}", written.display());
                self.config.export.open_after_export.then_some(written)
            }
            Err(e) => {
                tracing::error!(path = %requested.display(), error = %e, "export failed");
                self.status = format!("Error: {}", e);
                None
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.header.show(ui);
            ui.separator();
            if MenuBar::show(ui, &mut self.menu) {
                tracing::debug!(selection = ?self.menu.selection(), "menu selection changed");
            }
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let color = if self.status.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(color));
        });

        let mut action = PaneAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                match self.pages.get(&self.menu.selection()) {
                    Some(page) => action = ContentPane::show(ui, page),
                    None if self.is_loading => {
                        ui.centered_and_justified(|ui| {
                            ui.spinner();
                        });
                    }
                    None => {
                        ui.centered_and_justified(|ui| {
                            ui.label(RichText::new("No Data").size(20.0));
                        });
                    }
                }
            });
        });

        if action != PaneAction::None {
            self.handle_export(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(config: AppConfig) -> DashboardApp {
        let ctx = egui::Context::default();
        DashboardApp {
            header: Header::new(&ctx, &config.header),
            config,
            menu: MenuState::default(),
            pages: HashMap::new(),
            status: String::new(),
            load_rx: None,
            is_loading: false,
        }
    }

    fn loading_app() -> (DashboardApp, Sender<LoadResult>) {
        let mut app = app(AppConfig::default());
        let (tx, rx) = channel();
        app.load_rx = Some(rx);
        app.is_loading = true;
        (app, tx)
    }

    #[test]
    fn dropped_loader_stops_the_spinner() {
        let (mut app, tx) = loading_app();
        tx.send(LoadResult::Progress("Reading...".to_string())).unwrap();
        drop(tx);

        app.check_load_results();

        assert!(!app.is_loading);
        assert!(app.load_rx.is_none());
        assert!(app.status.starts_with("Error"));
    }

    #[test]
    fn pending_loader_keeps_waiting() {
        let (mut app, tx) = loading_app();
        tx.send(LoadResult::Progress("Reading...".to_string())).unwrap();

        app.check_load_results();

        assert!(app.is_loading);
        assert!(app.load_rx.is_some());
        assert_eq!(app.status, "Reading...");
    }

    #[test]
    fn completed_load_is_not_reported_as_error() {
        let (mut app, tx) = loading_app();
        tx.send(LoadResult::Complete(HashMap::new())).unwrap();
        drop(tx);

        app.check_load_results();

        assert!(!app.is_loading);
        assert_eq!(app.status, "Loaded 0 pages");
    }

    #[test]
    fn only_successful_exports_are_opened() {
        let mut config = AppConfig::default();
        config.export.open_after_export = true;
        let mut app = app(config);
        let requested = Path::new("Error report");

        let written = PathBuf::from("Error report.png");
        assert_eq!(
            app.finish_export(requested, Ok(written.clone())),
            Some(written)
        );
        assert_eq!(app.status, "Exported Error report.png");

        assert_eq!(app.finish_export(requested, Err(ExportError::NoChart)), None);
        assert!(app.status.starts_with("Error"));
    }

    #[test]
    fn exports_are_not_opened_unless_configured() {
        let mut app = app(AppConfig::default());
        let opened = app.finish_export(Path::new("chart"), Ok(PathBuf::from("chart.png")));
        assert_eq!(opened, None);
    }
}
