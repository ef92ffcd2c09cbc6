//! Chart Plotter Module
//! Draws interactive line and bar charts with egui_plot, and the quarterly
//! heatmap with the egui painter.

use crate::charts::palette;
use crate::charts::{CategorySeries, ChartBody, ChartSpec};
use crate::data::HeatmapMatrix;
use egui::{Align2, Color32, FontId, RichText, Sense, Stroke};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};
use std::ops::RangeInclusive;

const CHART_HEIGHT: f32 = 380.0;
const HEATMAP_LABEL_WIDTH: f32 = 60.0;
const HEATMAP_HEADER_HEIGHT: f32 = 24.0;
const HEATMAP_MAX_ROW_HEIGHT: f32 = 48.0;
const BAR_GROUP_WIDTH: f64 = 0.8;

pub fn series_color(index: usize) -> Color32 {
    let (r, g, b) = palette::series_rgb(index);
    Color32::from_rgb(r, g, b)
}

fn rgb(c: (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

/// Creates the dashboard's interactive charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw any chart spec into the available width.
    pub fn draw(ui: &mut egui::Ui, spec: &ChartSpec) {
        ui.label(RichText::new(&spec.title).size(16.0).strong());
        ui.add_space(6.0);

        match &spec.body {
            ChartBody::Line(data) => Self::draw_line_chart(ui, &spec.title, &spec.y_label, data),
            ChartBody::Bar(data) => Self::draw_bar_chart(ui, &spec.title, &spec.y_label, data),
            ChartBody::Heatmap(matrix) => Self::draw_heatmap(ui, matrix),
        }
    }

    /// Split a series into runs of finite values so gaps stay visible.
    pub fn finite_segments(values: &[f64]) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();

        for (i, &v) in values.iter().enumerate() {
            if v.is_finite() {
                current.push([i as f64, v]);
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }

    /// Axis formatter that maps integer x positions to category labels.
    fn category_formatter(
        categories: &[String],
    ) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
        let labels = categories.to_vec();
        move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        }
    }

    /// Line chart, one line (with markers) per series.
    pub fn draw_line_chart(ui: &mut egui::Ui, id: &str, y_label: &str, data: &CategorySeries) {
        Plot::new(format!("line_{}", id))
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .y_axis_label(y_label.to_string())
            .x_axis_formatter(Self::category_formatter(&data.categories))
            .show(ui, |plot_ui| {
                for (idx, series) in data.series.iter().enumerate() {
                    let color = series_color(idx);

                    for segment in Self::finite_segments(&series.values) {
                        plot_ui.line(
                            Line::new(PlotPoints::from_iter(segment.iter().copied()))
                                .color(color)
                                .width(2.0)
                                .name(&series.name),
                        );
                        plot_ui.points(
                            Points::new(PlotPoints::from_iter(segment.iter().copied()))
                                .radius(3.0)
                                .color(color)
                                .name(&series.name),
                        );
                    }
                }
            });
    }

    /// Grouped bar chart; series share each category slot side by side.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, y_label: &str, data: &CategorySeries) {
        let n_series = data.series.len().max(1);
        let bar_width = BAR_GROUP_WIDTH / n_series as f64;

        Plot::new(format!("bar_{}", id))
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .y_axis_label(y_label.to_string())
            .x_axis_formatter(Self::category_formatter(&data.categories))
            .show(ui, |plot_ui| {
                for (idx, series) in data.series.iter().enumerate() {
                    let offset = Self::bar_offset(idx, n_series, bar_width);
                    let bars: Vec<Bar> = series
                        .values
                        .iter()
                        .enumerate()
                        .filter(|(_, v)| v.is_finite())
                        .map(|(i, &v)| {
                            let label = data.categories.get(i).cloned().unwrap_or_default();
                            Bar::new(i as f64 + offset, v)
                                .width(bar_width * 0.95)
                                .name(format!("{} {}", series.name, label))
                        })
                        .collect();

                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .color(series_color(idx))
                            .name(&series.name),
                    );
                }
            });
    }

    /// Horizontal offset of series `idx` within a category slot.
    pub fn bar_offset(idx: usize, n_series: usize, bar_width: f64) -> f64 {
        (idx as f64 - (n_series as f64 - 1.0) / 2.0) * bar_width
    }

    /// Year x quarter grid colored on a sequential scale, values printed in cells.
    pub fn draw_heatmap(ui: &mut egui::Ui, matrix: &HeatmapMatrix) {
        if matrix.is_empty() {
            ui.label(RichText::new("No observations").color(Color32::GRAY));
            return;
        }

        let (lo, hi) = matrix.value_range().unwrap_or((0.0, 1.0));
        let width = ui.available_width();
        let rows = matrix.years.len() as f32;
        let row_h = ((CHART_HEIGHT - HEATMAP_HEADER_HEIGHT) / rows).min(HEATMAP_MAX_ROW_HEIGHT);
        let height = HEATMAP_HEADER_HEIGHT + row_h * rows;
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), Sense::hover());
        let painter = ui.painter_at(rect);

        let cols = matrix.quarters.len().max(1) as f32;
        let col_w = (width - HEATMAP_LABEL_WIDTH) / cols;
        let text_color = ui.visuals().text_color();

        for (c, quarter) in matrix.quarters.iter().enumerate() {
            let x = rect.left() + HEATMAP_LABEL_WIDTH + col_w * (c as f32 + 0.5);
            painter.text(
                egui::pos2(x, rect.top() + HEATMAP_HEADER_HEIGHT / 2.0),
                Align2::CENTER_CENTER,
                quarter,
                FontId::proportional(13.0),
                text_color,
            );
        }

        for (r, (year, row)) in matrix.years.iter().zip(&matrix.cells).enumerate() {
            let top = rect.top() + HEATMAP_HEADER_HEIGHT + row_h * r as f32;
            painter.text(
                egui::pos2(rect.left() + HEATMAP_LABEL_WIDTH / 2.0, top + row_h / 2.0),
                Align2::CENTER_CENTER,
                year.to_string(),
                FontId::proportional(13.0),
                text_color,
            );

            for (c, cell) in row.iter().enumerate() {
                let cell_rect = egui::Rect::from_min_size(
                    egui::pos2(rect.left() + HEATMAP_LABEL_WIDTH + col_w * c as f32, top),
                    egui::vec2(col_w, row_h),
                )
                .shrink(1.5);

                match cell {
                    Some(v) => {
                        let fill = palette::heat_rgb(palette::normalize(*v, lo, hi));
                        painter.rect_filled(cell_rect, 3.0, rgb(fill));
                        painter.text(
                            cell_rect.center(),
                            Align2::CENTER_CENTER,
                            format!("{:.2}", v),
                            FontId::proportional(12.0),
                            rgb(palette::contrast_text(fill)),
                        );
                    }
                    None => {
                        painter.rect_stroke(cell_rect, 3.0, Stroke::new(1.0, Color32::GRAY));
                    }
                }
            }
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{:.2}", lo)).size(11.0));
            for step in 0..=10 {
                let (swatch, _) = ui.allocate_exact_size(egui::vec2(14.0, 10.0), Sense::hover());
                ui.painter()
                    .rect_filled(swatch, 0.0, rgb(palette::heat_rgb(step as f64 / 10.0)));
            }
            ui.label(RichText::new(format!("{:.2}", hi)).size(11.0));
        });
    }
}
