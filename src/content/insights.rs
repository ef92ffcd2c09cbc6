//! Insight bullets derived from series summaries.

use crate::data::TimeSeries;
use crate::stats::{SeriesSummary, TrendDirection};

/// How values of a series are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Percentages; changes are in percentage points.
    Percent,
    /// Index numbers such as IPM.
    Index,
    /// Coefficients such as the Gini ratio.
    Ratio,
    /// Amounts with a suffix, e.g. "trillion Rp".
    Amount(&'static str),
}

impl Unit {
    pub fn format(self, value: f64) -> String {
        match self {
            Unit::Percent => format!("{:.2}%", value),
            Unit::Index => format!("{:.2}", value),
            Unit::Ratio => format!("{:.3}", value),
            Unit::Amount(suffix) => format!("{:.1} {}", value, suffix),
        }
    }

    fn format_change(self, delta: f64) -> String {
        let magnitude = delta.abs();
        match self {
            Unit::Percent => format!("{:.2} percentage points", magnitude),
            Unit::Index => format!("{:.2} points", magnitude),
            Unit::Ratio => format!("{:.3}", magnitude),
            Unit::Amount(suffix) => format!("{:.1} {}", magnitude, suffix),
        }
    }
}

/// Standard bullets for one series: latest value, change, extremes, average and trend.
pub fn summary_insights(summary: &SeriesSummary, unit: Unit) -> Vec<String> {
    if summary.count == 0 {
        return vec![format!("No observations available for {}.", summary.name)];
    }

    let mut bullets = Vec::with_capacity(4);

    if let Some(latest) = summary.latest {
        let at = summary.latest_at.as_deref().unwrap_or("latest period");
        bullets.push(format!(
            "Latest {}: {} ({}).",
            summary.name,
            unit.format(latest),
            at
        ));
    }

    if let Some(change) = summary.change {
        bullets.push(if change.abs() < 1e-9 {
            "Unchanged from the previous period.".to_string()
        } else if change > 0.0 {
            format!("Up {} from the previous period.", unit.format_change(change))
        } else {
            format!("Down {} from the previous period.", unit.format_change(change))
        });
    }

    if summary.count > 1 {
        bullets.push(format!(
            "Highest {} in {}; lowest {} in {}.",
            unit.format(summary.max),
            summary.max_at.as_deref().unwrap_or("-"),
            unit.format(summary.min),
            summary.min_at.as_deref().unwrap_or("-"),
        ));
    }

    let trend = match summary.trend_direction() {
        TrendDirection::Rising => "rising",
        TrendDirection::Falling => "falling",
        TrendDirection::Flat => "flat",
    };
    bullets.push(format!(
        "Average {} (median {}) over {} periods; the overall trend is {}.",
        unit.format(summary.mean),
        unit.format(summary.median),
        summary.count,
        trend
    ));

    bullets
}

/// Compare the latest quarter with the same quarter a year earlier.
///
/// `None` when the labels are not quarters or the earlier quarter is missing.
pub fn same_quarter_insight(series: &TimeSeries, unit: Unit) -> Option<String> {
    let points = series.quarterly_points();
    let &(period, value) = points.iter().rev().find(|(_, v)| v.is_finite())?;
    let earlier = period.year_earlier();
    let &(_, base) = points
        .iter()
        .find(|(p, v)| *p == earlier && v.is_finite())?;

    let delta = value - base;
    let movement = if delta.abs() < 1e-9 {
        "unchanged".to_string()
    } else if delta > 0.0 {
        format!("up {}", unit.format_change(delta))
    } else {
        format!("down {}", unit.format_change(delta))
    };
    Some(format!(
        "{} is {} on {} ({}).",
        period,
        movement,
        earlier,
        unit.format(base)
    ))
}

/// Bullets for a categorical breakdown (no time order): top, bottom and average.
pub fn ranking_insights(what: &str, labels: &[String], values: &[f64], unit: Unit) -> Vec<String> {
    let ranked: Vec<(&String, f64)> = labels
        .iter()
        .zip(values.iter().copied())
        .filter(|(_, v)| v.is_finite())
        .collect();

    let Some(&(first_label, first_value)) = ranked.first() else {
        return vec![format!("No observations available for {}.", what)];
    };

    let (top_label, top) = ranked.iter().fold((first_label, first_value), |acc, &(l, v)| {
        if v > acc.1 {
            (l, v)
        } else {
            acc
        }
    });
    let (bottom_label, bottom) = ranked.iter().fold((first_label, first_value), |acc, &(l, v)| {
        if v < acc.1 {
            (l, v)
        } else {
            acc
        }
    });
    let average = ranked.iter().map(|&(_, v)| v).sum::<f64>() / ranked.len() as f64;

    vec![
        format!("Highest {}: {} ({}).", what, top_label, unit.format(top)),
        format!("Lowest {}: {} ({}).", what, bottom_label, unit.format(bottom)),
        format!(
            "Average across {} items: {}.",
            ranked.len(),
            unit.format(average)
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatsCalculator;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn percent_bullets() {
        let s = StatsCalculator::summarize(
            "Poverty rate",
            &labels(&["2022", "2023", "2024"]),
            &[9.57, 9.36, 9.03],
        );
        let bullets = summary_insights(&s, Unit::Percent);

        assert_eq!(bullets.len(), 4);
        assert_eq!(bullets[0], "Latest Poverty rate: 9.03% (2024).");
        assert_eq!(bullets[1], "Down 0.33 percentage points from the previous period.");
        assert_eq!(bullets[2], "Highest 9.57% in 2022; lowest 9.03% in 2024.");
        assert_eq!(
            bullets[3],
            "Average 9.32% (median 9.36%) over 3 periods; the overall trend is falling."
        );
    }

    #[test]
    fn same_quarter_comparison() {
        let s = TimeSeries::from_pairs(
            "g",
            [("2023 Q3", 5.05), ("2024 Q2", 5.05), ("2024 Q3", 4.95), ("2024 Q4", f64::NAN)],
        );
        assert_eq!(
            same_quarter_insight(&s, Unit::Percent).as_deref(),
            Some("2024 Q3 is down 0.10 percentage points on 2023 Q3 (5.05%).")
        );

        let short = TimeSeries::from_pairs("g", [("2024 Q2", 5.05), ("2024 Q3", 4.95)]);
        assert_eq!(same_quarter_insight(&short, Unit::Percent), None);

        let annual = TimeSeries::from_pairs("g", [("2023", 5.05), ("2024", 4.95)]);
        assert_eq!(same_quarter_insight(&annual, Unit::Percent), None);
    }

    #[test]
    fn empty_series_gets_single_bullet() {
        let s = StatsCalculator::summarize("Gini", &[], &[]);
        assert_eq!(
            summary_insights(&s, Unit::Ratio),
            vec!["No observations available for Gini.".to_string()]
        );
    }

    #[test]
    fn ranking_picks_extremes() {
        let bullets = ranking_insights(
            "group inflation",
            &labels(&["Food", "Health", "Transport"]),
            &[3.56, 1.84, f64::NAN],
            Unit::Percent,
        );
        assert_eq!(bullets[0], "Highest group inflation: Food (3.56%).");
        assert_eq!(bullets[1], "Lowest group inflation: Health (1.84%).");
        assert_eq!(bullets[2], "Average across 2 items: 2.70%.");
    }

    #[test]
    fn unit_formatting() {
        assert_eq!(Unit::Ratio.format(0.3814), "0.381");
        assert_eq!(Unit::Amount("USD bn").format(264.66), "264.7 USD bn");
        assert_eq!(Unit::Index.format_change(-0.654), "0.65 points");
    }
}
