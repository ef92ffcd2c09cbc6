//! Static Chart Renderer
//! Renders a chart spec to a PNG file with plotters, for export.
//!
//! Layout:
//! 1. Caption with the chart title
//! 2. Plot area with category labels on x and the unit on y
//! 3. Legend box (line and bar charts only)

use crate::charts::palette;
use crate::charts::{CategorySeries, ChartBody, ChartSpec};
use crate::data::HeatmapMatrix;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

const MAX_X_LABELS: usize = 14;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Nothing to draw")]
    Empty,
}

fn drawing_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

fn color(c: (u8, u8, u8)) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `spec` to a PNG at `path`.
    pub fn render_png(
        spec: &ChartSpec,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_err)?;

        match &spec.body {
            ChartBody::Line(data) => Self::draw_categories(&root, spec, data, false)?,
            ChartBody::Bar(data) => Self::draw_categories(&root, spec, data, true)?,
            ChartBody::Heatmap(matrix) => Self::draw_heatmap(&root, spec, matrix)?,
        }

        root.present().map_err(drawing_err)?;
        tracing::info!(path = %path.display(), kind = spec.kind_name(), "chart rendered");
        Ok(())
    }

    /// Y range with 10% headroom. Bar charts always include zero.
    pub fn y_range(data: &CategorySeries, include_zero: bool) -> Option<(f64, f64)> {
        let (mut lo, mut hi) = data.value_range()?;
        if include_zero {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        let pad = ((hi - lo) * 0.1).max(0.5);
        let lo = if include_zero && lo == 0.0 { 0.0 } else { lo - pad };
        Some((lo, hi + pad))
    }

    fn draw_categories<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        spec: &ChartSpec,
        data: &CategorySeries,
        as_bars: bool,
    ) -> Result<(), RenderError> {
        let (y_lo, y_hi) = Self::y_range(data, as_bars).ok_or(RenderError::Empty)?;
        let n = data.categories.len().max(1);

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), y_lo..y_hi)
            .map_err(drawing_err)?;

        let categories = &data.categories;
        let x_fmt = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                String::new()
            } else {
                categories.get(idx as usize).cloned().unwrap_or_default()
            }
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n.min(MAX_X_LABELS))
            .x_label_formatter(&x_fmt)
            .y_desc(spec.y_label.as_str())
            .draw()
            .map_err(drawing_err)?;

        let n_series = data.series.len().max(1);
        let bar_width = 0.8 / n_series as f64;

        for (idx, series) in data.series.iter().enumerate() {
            let c = color(palette::series_rgb(idx));

            if as_bars {
                let offset = (idx as f64 - (n_series as f64 - 1.0) / 2.0) * bar_width;
                chart
                    .draw_series(
                        series
                            .values
                            .iter()
                            .enumerate()
                            .filter(|(_, v)| v.is_finite())
                            .map(|(i, &v)| {
                                let x0 = i as f64 + offset - bar_width / 2.0;
                                Rectangle::new([(x0, 0.0), (x0 + bar_width * 0.95, v)], c.filled())
                            }),
                    )
                    .map_err(drawing_err)?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], c.filled()));
            } else {
                let points: Vec<(f64, f64)> = series
                    .values
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.is_finite())
                    .map(|(i, &v)| (i as f64, v))
                    .collect();

                chart
                    .draw_series(LineSeries::new(points.iter().copied(), c.stroke_width(2)))
                    .map_err(drawing_err)?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], c));

                chart
                    .draw_series(points.iter().map(|&p| Circle::new(p, 3, c.filled())))
                    .map_err(drawing_err)?;
            }
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .draw()
            .map_err(drawing_err)?;

        Ok(())
    }

    fn draw_heatmap<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        spec: &ChartSpec,
        matrix: &HeatmapMatrix,
    ) -> Result<(), RenderError> {
        if matrix.is_empty() {
            return Err(RenderError::Empty);
        }
        let (lo, hi) = matrix.value_range().unwrap_or((0.0, 1.0));
        let rows = matrix.years.len();
        let cols = matrix.quarters.len().max(1);

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..cols as f64, 0f64..rows as f64)
            .map_err(drawing_err)?;

        let quarters = &matrix.quarters;
        let years = &matrix.years;
        let x_fmt = |x: &f64| quarters.get(x.floor() as usize).cloned().unwrap_or_default();
        let y_fmt = |y: &f64| {
            Self::heatmap_row_at(*y, rows)
                .and_then(|r| years.get(r))
                .map(|year| year.to_string())
                .unwrap_or_default()
        };

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(cols * 2 + 1)
            .y_labels(rows * 2 + 1)
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .draw()
            .map_err(drawing_err)?;

        let centered = Pos::new(HPos::Center, VPos::Center);

        for (r, row) in matrix.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let Some(v) = cell else { continue };
                let fill = palette::heat_rgb(palette::normalize(*v, lo, hi));
                let (x0, y0) = (c as f64, Self::heatmap_row_bottom(r, rows));

                chart
                    .draw_series(std::iter::once(Rectangle::new(
                        [(x0 + 0.02, y0 + 0.02), (x0 + 0.98, y0 + 0.98)],
                        color(fill).filled(),
                    )))
                    .map_err(drawing_err)?;

                let text_style = ("sans-serif", 16)
                    .into_font()
                    .color(&color(palette::contrast_text(fill)))
                    .pos(centered);
                chart
                    .draw_series(std::iter::once(Text::new(
                        format!("{:.2}", v),
                        (x0 + 0.5, y0 + 0.5),
                        text_style,
                    )))
                    .map_err(drawing_err)?;
            }
        }

        Ok(())
    }

    /// Bottom edge of matrix row `r`. The first year sits at the top, as on screen.
    fn heatmap_row_bottom(r: usize, rows: usize) -> f64 {
        rows.saturating_sub(r + 1) as f64
    }

    /// Matrix row drawn at height `y`, if any.
    fn heatmap_row_at(y: f64, rows: usize) -> Option<usize> {
        if y < 0.0 {
            return None;
        }
        rows.checked_sub(1)?.checked_sub(y.floor() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_range_includes_zero() {
        let data = CategorySeries::new(vec!["a".into(), "b".into()]).with_series("x", vec![5.0, 10.0]);
        let (lo, hi) = StaticChartRenderer::y_range(&data, true).unwrap();
        assert_eq!(lo, 0.0);
        assert!(hi > 10.0);
    }

    #[test]
    fn line_range_is_padded_both_sides() {
        let data = CategorySeries::new(vec!["a".into(), "b".into()]).with_series("x", vec![5.0, 10.0]);
        let (lo, hi) = StaticChartRenderer::y_range(&data, false).unwrap();
        assert!(lo < 5.0 && lo > 0.0);
        assert!(hi > 10.0);
    }

    #[test]
    fn negative_bars_get_headroom_below() {
        let data = CategorySeries::new(vec!["a".into()]).with_series("x", vec![-4.0]);
        let (lo, hi) = StaticChartRenderer::y_range(&data, true).unwrap();
        assert!(lo < -4.0);
        assert!(hi > 0.0);
    }

    #[test]
    fn empty_series_has_no_range() {
        let data = CategorySeries::new(vec!["a".into()]).with_series("x", vec![f64::NAN]);
        assert!(StaticChartRenderer::y_range(&data, false).is_none());
    }

    #[test]
    fn heatmap_first_year_is_drawn_on_top() {
        assert_eq!(StaticChartRenderer::heatmap_row_bottom(0, 6), 5.0);
        assert_eq!(StaticChartRenderer::heatmap_row_bottom(5, 6), 0.0);

        assert_eq!(StaticChartRenderer::heatmap_row_at(5.5, 6), Some(0));
        assert_eq!(StaticChartRenderer::heatmap_row_at(0.5, 6), Some(5));
        assert_eq!(StaticChartRenderer::heatmap_row_at(6.0, 6), None);
        assert_eq!(StaticChartRenderer::heatmap_row_at(-0.5, 6), None);
        assert_eq!(StaticChartRenderer::heatmap_row_at(0.5, 0), None);
    }
}
