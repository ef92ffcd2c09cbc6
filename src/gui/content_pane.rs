//! Content Pane Widget
//! Notice banner, the page chart, and the insight bullets beside it.

use crate::charts::ChartPlotter;
use crate::content::{Notice, PageContent};
use egui::{Color32, RichText};

const WARNING_FILL: Color32 = Color32::from_rgb(255, 243, 205);
const WARNING_TEXT: Color32 = Color32::from_rgb(133, 100, 4);
const ERROR_FILL: Color32 = Color32::from_rgb(248, 215, 218);
const ERROR_TEXT: Color32 = Color32::from_rgb(114, 28, 36);
const CHART_SHARE: f32 = 0.68;

/// Actions triggered from the content pane
#[derive(Debug, Clone, PartialEq)]
pub enum PaneAction {
    None,
    ExportPng,
    ExportJson,
}

pub struct ContentPane;

impl ContentPane {
    pub fn show(ui: &mut egui::Ui, page: &PageContent) -> PaneAction {
        let mut action = PaneAction::None;

        ui.horizontal(|ui| {
            ui.label(RichText::new(&page.title).size(18.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Export JSON").clicked() {
                    action = PaneAction::ExportJson;
                }
                ui.add_enabled_ui(page.chart.is_some(), |ui| {
                    if ui.button("Export PNG").clicked() {
                        action = PaneAction::ExportPng;
                    }
                });
            });
        });
        ui.add_space(6.0);

        if let Some(notice) = &page.notice {
            Self::show_notice(ui, notice);
            ui.add_space(6.0);
        }

        let chart_width = ui.available_width() * CHART_SHARE;
        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(chart_width);
                match &page.chart {
                    Some(chart) => ChartPlotter::draw(ui, chart),
                    None => Self::show_placeholder(ui),
                }
            });

            ui.add_space(12.0);

            ui.vertical(|ui| {
                ui.label(RichText::new("Insights").size(15.0).strong());
                ui.add_space(4.0);
                for line in &page.insights {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new("•").size(14.0));
                        ui.label(RichText::new(line).size(14.0));
                    });
                }
            });
        });

        action
    }

    fn show_notice(ui: &mut egui::Ui, notice: &Notice) {
        let (fill, text_color, prefix, message) = match notice {
            Notice::Warning(m) => (WARNING_FILL, WARNING_TEXT, "⚠", m),
            Notice::Error(m) => (ERROR_FILL, ERROR_TEXT, "✖", m),
        };

        egui::Frame::none()
            .fill(fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(format!("{} {}", prefix, message))
                        .size(13.0)
                        .color(text_color),
                );
            });
    }

    fn show_placeholder(ui: &mut egui::Ui) {
        egui::Frame::none()
            .stroke(egui::Stroke::new(1.0, Color32::GRAY))
            .rounding(5.0)
            .inner_margin(40.0)
            .show(ui, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("Data unavailable").size(18.0).color(Color32::GRAY));
                });
            });
    }
}
