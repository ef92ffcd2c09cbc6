//! Export Module
//! Writes the current page as a PNG chart or a JSON document.

use crate::charts::{RenderError, StaticChartRenderer};
use crate::config::ExportConfig;
use crate::content::{PageContent, Selection};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("This page has no chart to export")]
    NoChart,
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Write error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render the page's chart as PNG. Returns the path actually written.
pub fn export_chart_png(
    page: &PageContent,
    path: &Path,
    config: &ExportConfig,
) -> Result<PathBuf, ExportError> {
    let chart = page.chart.as_ref().ok_or(ExportError::NoChart)?;
    let path = with_extension(path, "png");
    StaticChartRenderer::render_png(chart, &path, config.width, config.height)?;
    Ok(path)
}

/// Write the page (chart data, insights, notice) as pretty JSON.
/// Returns the path actually written.
pub fn export_page_json(page: &PageContent, path: &Path) -> Result<PathBuf, ExportError> {
    let path = with_extension(path, "json");
    let json = serde_json::to_string_pretty(page)?;
    std::fs::write(&path, json)?;
    tracing::info!(path = %path.display(), "page exported as JSON");
    Ok(path)
}

/// Append `.extension` unless the path already ends with it.
///
/// The PNG encoder picks the image format from the extension, and save
/// dialogs may hand back a bare file name.
pub fn with_extension(path: &Path, extension: &str) -> PathBuf {
    let has_it = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
    if has_it {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// File name suggestion such as `trade_trade-balance.png`.
pub fn suggested_file_name(selection: Selection, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        slug(selection.category.label()),
        slug(selection.sub_label()),
        extension
    )
}

fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Category;

    #[test]
    fn file_names_are_slugged() {
        let s = Selection::new(Category::Trade, 0).unwrap();
        assert_eq!(suggested_file_name(s, "png"), "trade_exports-imports.png");

        let s = Selection::new(Category::NationalAccounts, 0).unwrap();
        assert_eq!(
            suggested_file_name(s, "json"),
            "national-accounts_growth-y-o-y.json"
        );
    }

    #[test]
    fn missing_extension_is_appended() {
        assert_eq!(with_extension(Path::new("out/chart"), "png"), PathBuf::from("out/chart.png"));
        assert_eq!(with_extension(Path::new("chart.PNG"), "png"), PathBuf::from("chart.PNG"));
        assert_eq!(
            with_extension(Path::new("report.v2"), "png"),
            PathBuf::from("report.v2.png")
        );
    }
}
