//! Chart Specification
//! Backend-independent description of what a page draws.

use crate::data::HeatmapMatrix;
use serde::Serialize;

/// One named line or bar group over the shared categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl NamedSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Categorical x axis with one or more value series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorySeries {
    pub categories: Vec<String>,
    pub series: Vec<NamedSeries>,
}

impl CategorySeries {
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            categories,
            series: Vec::new(),
        }
    }

    pub fn with_series(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.series.push(NamedSeries::new(name, values));
        self
    }

    /// Min and max over all finite values, if any.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ChartBody {
    Line(CategorySeries),
    Bar(CategorySeries),
    Heatmap(HeatmapMatrix),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub y_label: String,
    pub body: ChartBody,
}

impl ChartSpec {
    pub fn line(title: impl Into<String>, y_label: impl Into<String>, data: CategorySeries) -> Self {
        Self {
            title: title.into(),
            y_label: y_label.into(),
            body: ChartBody::Line(data),
        }
    }

    pub fn bar(title: impl Into<String>, y_label: impl Into<String>, data: CategorySeries) -> Self {
        Self {
            title: title.into(),
            y_label: y_label.into(),
            body: ChartBody::Bar(data),
        }
    }

    pub fn heatmap(
        title: impl Into<String>,
        y_label: impl Into<String>,
        matrix: HeatmapMatrix,
    ) -> Self {
        Self {
            title: title.into(),
            y_label: y_label.into(),
            body: ChartBody::Heatmap(matrix),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.body {
            ChartBody::Line(_) => "line",
            ChartBody::Bar(_) => "bar",
            ChartBody::Heatmap(_) => "heatmap",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_range_ignores_nan() {
        let data = CategorySeries::new(vec!["a".into(), "b".into()])
            .with_series("x", vec![1.0, f64::NAN])
            .with_series("y", vec![-2.0, 4.0]);
        assert_eq!(data.value_range(), Some((-2.0, 4.0)));
        assert_eq!(CategorySeries::default().value_range(), None);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let spec = ChartSpec::bar(
            "Trade",
            "USD bn",
            CategorySeries::new(vec!["2024".into()]).with_series("export", vec![264.7]),
        );
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["body"]["kind"], "bar");
        assert_eq!(json["body"]["data"]["series"][0]["name"], "export");
    }
}
