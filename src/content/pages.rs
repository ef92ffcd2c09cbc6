//! Page assembly
//! Maps every (category, sub-item) selection to a chart and insight text.

use crate::charts::{CategorySeries, ChartSpec};
use crate::content::insights::{ranking_insights, same_quarter_insight, summary_insights, Unit};
use crate::content::menu::{Category, Selection};
use crate::data::{
    load_growth_series, quarter_over_quarter, year_over_year, DataProcessor, LoadedSeries,
    ProcessorError, SampleDatasets, TimeSeries,
};
use crate::stats::StatsCalculator;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Quarters between an observation and the same quarter a year earlier.
const QUARTERS_PER_YEAR: usize = 4;

/// Banner shown above the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Warning(String),
    Error(String),
}

/// Everything the content pane shows for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct PageContent {
    pub selection: Selection,
    pub title: String,
    /// `None` renders the "data unavailable" placeholder.
    pub chart: Option<ChartSpec>,
    pub insights: Vec<String>,
    pub notice: Option<Notice>,
}

/// Outcome of loading the growth CSV.
#[derive(Debug, Clone)]
pub enum GrowthData {
    Loaded(LoadedSeries),
    /// Read or parse failure; holds the error text.
    Failed(String),
}

impl GrowthData {
    /// Load the growth CSV. Read and parse failures are kept as their error text.
    pub fn load(path: &Path) -> Self {
        match load_growth_series(path) {
            Ok(loaded) => GrowthData::Loaded(loaded),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "growth CSV failed to load");
                GrowthData::Failed(e.to_string())
            }
        }
    }
}

/// Inputs every page draws from.
#[derive(Debug, Clone)]
pub struct DataContext {
    pub growth: GrowthData,
    pub datasets: SampleDatasets,
}

/// Build every page in parallel.
pub fn build_all_pages(ctx: &DataContext) -> HashMap<Selection, PageContent> {
    let pages: HashMap<Selection, PageContent> = Selection::all()
        .par_iter()
        .map(|&selection| (selection, build_page(selection, ctx)))
        .collect();
    tracing::debug!(pages = pages.len(), "pages built");
    pages
}

/// Build one page. Processing failures become an error notice on the page.
pub fn build_page(selection: Selection, ctx: &DataContext) -> PageContent {
    let title = format!("{} - {}", selection.category.label(), selection.sub_label());

    match try_build(selection, ctx) {
        Ok(mut page) => {
            page.title = title;
            page
        }
        Err(e) => {
            tracing::error!(page = %title, error = %e, "page build failed");
            placeholder(selection, title, e.to_string())
        }
    }
}

fn placeholder(selection: Selection, title: String, message: String) -> PageContent {
    PageContent {
        selection,
        title,
        chart: None,
        insights: Vec::new(),
        notice: Some(Notice::Error(message)),
    }
}

fn page(selection: Selection, chart: ChartSpec, mut insights: Vec<String>) -> PageContent {
    insights.push(canned_note(selection).to_string());
    PageContent {
        selection,
        title: String::new(),
        chart: Some(chart),
        insights,
        notice: None,
    }
}

fn try_build(selection: Selection, ctx: &DataContext) -> Result<PageContent, ProcessorError> {
    let ds = &ctx.datasets;

    match (selection.category, selection.sub_index) {
        (Category::NationalAccounts, 0) => Ok(growth_page(selection, &ctx.growth)),
        (Category::NationalAccounts, 1) => {
            let levels = &ds.gdp_constant_quarterly;
            let labels = levels.labels();
            let qtq = quarter_over_quarter(&levels.values());
            let summary = StatsCalculator::summarize("q-to-q growth", &labels, &qtq);
            Ok(page(
                selection,
                ChartSpec::bar(
                    "GDP growth, quarter over quarter",
                    "%",
                    CategorySeries::new(labels).with_series("q-to-q", qtq),
                ),
                summary_insights(&summary, Unit::Percent),
            ))
        }
        (Category::NationalAccounts, 2) => {
            let obs = &ds.gdp_quarterly_growth;
            let labels: Vec<String> = obs.iter().map(|(p, _)| p.to_string()).collect();
            let values: Vec<f64> = obs.iter().map(|&(_, v)| v).collect();
            let summary = StatsCalculator::summarize("GDP growth", &labels, &values);
            Ok(page(
                selection,
                ChartSpec::heatmap(
                    "GDP growth y-o-y by quarter",
                    "%",
                    DataProcessor::build_heatmap(obs),
                ),
                summary_insights(&summary, Unit::Percent),
            ))
        }
        (Category::NationalAccounts, 3) => {
            let df = &ds.gdp_annual;
            let years = DataProcessor::label_column(df, "year")?;
            let adhb = DataProcessor::f64_column(df, "adhb")?;
            let adhk = DataProcessor::f64_column(df, "adhk")?;
            let summary = StatsCalculator::summarize("PDB ADHK", &years, &adhk);

            let mut insights = summary_insights(&summary, Unit::Amount("trillion Rp"));
            if let (Some(&b), Some(&k)) = (adhb.last(), adhk.last()) {
                if k != 0.0 {
                    insights.push(format!("Implicit GDP deflator: {:.1}.", b / k * 100.0));
                }
            }

            Ok(page(
                selection,
                ChartSpec::line(
                    "GDP at current (ADHB) and constant (ADHK) prices",
                    "trillion Rp",
                    CategorySeries::new(years)
                        .with_series("ADHB", adhb)
                        .with_series("ADHK", adhk),
                ),
                insights,
            ))
        }
        (Category::NationalAccounts, _) => {
            Ok(adhk_growth_page(selection, &ds.gdp_constant_quarterly))
        }
        (Category::PriceIndex, 0) => {
            let s = &ds.inflation;
            let summary = StatsCalculator::summarize_series(s);
            Ok(page(
                selection,
                ChartSpec::line(
                    "Monthly inflation, year on year",
                    "%",
                    CategorySeries::new(s.labels()).with_series("Inflation", s.values()),
                ),
                summary_insights(&summary, Unit::Percent),
            ))
        }
        (Category::PriceIndex, _) => {
            let df = &ds.cpi_groups;
            let groups = DataProcessor::label_column(df, "group")?;
            let values = DataProcessor::f64_column(df, "inflation")?;
            let insights = ranking_insights("group inflation", &groups, &values, Unit::Percent);
            Ok(page(
                selection,
                ChartSpec::bar(
                    "Inflation by expenditure group",
                    "%",
                    CategorySeries::new(groups).with_series("Inflation", values),
                ),
                insights,
            ))
        }
        (Category::Trade, sub) => {
            let df = DataProcessor::with_trade_balance(&ds.trade)?;
            let years = DataProcessor::label_column(&df, "year")?;

            match sub {
                0 => {
                    let export = DataProcessor::f64_column(&df, "export")?;
                    let import = DataProcessor::f64_column(&df, "import")?;
                    let summary = StatsCalculator::summarize("exports", &years, &export);
                    Ok(page(
                        selection,
                        ChartSpec::line(
                            "Exports and imports",
                            "USD bn",
                            CategorySeries::new(years)
                                .with_series("Export", export)
                                .with_series("Import", import),
                        ),
                        summary_insights(&summary, Unit::Amount("USD bn")),
                    ))
                }
                1 => {
                    let balance = DataProcessor::f64_column(&df, "balance")?;
                    let summary = StatsCalculator::summarize("trade balance", &years, &balance);
                    Ok(page(
                        selection,
                        ChartSpec::bar(
                            "Trade balance",
                            "USD bn",
                            CategorySeries::new(years).with_series("Balance", balance),
                        ),
                        summary_insights(&summary, Unit::Amount("USD bn")),
                    ))
                }
                _ => {
                    let export_share = DataProcessor::f64_column(&df, "export_share")?;
                    let import_share = DataProcessor::f64_column(&df, "import_share")?;
                    let summary =
                        StatsCalculator::summarize("export share of trade", &years, &export_share);
                    Ok(page(
                        selection,
                        ChartSpec::bar(
                            "Contribution to total trade",
                            "% of total",
                            CategorySeries::new(years)
                                .with_series("Export share", export_share)
                                .with_series("Import share", import_share),
                        ),
                        summary_insights(&summary, Unit::Percent),
                    ))
                }
            }
        }
        (Category::Budget, sub) => {
            let df = DataProcessor::with_realization(&ds.budget)?;
            let items = DataProcessor::label_column(&df, "item")?;
            let rate = DataProcessor::f64_column(&df, "realization_pct")?;
            let insights = ranking_insights("realization", &items, &rate, Unit::Percent);

            let chart = if sub == 0 {
                ChartSpec::bar(
                    "Budget plan vs realization",
                    "trillion Rp",
                    CategorySeries::new(items)
                        .with_series("Planned", DataProcessor::f64_column(&df, "planned")?)
                        .with_series("Realized", DataProcessor::f64_column(&df, "realized")?),
                )
            } else {
                ChartSpec::bar(
                    "Budget realization rate",
                    "% of plan",
                    CategorySeries::new(items).with_series("Realization", rate),
                )
            };
            Ok(page(selection, chart, insights))
        }
        (Category::Employment, sub) => {
            let df = &ds.employment;
            let years = DataProcessor::label_column(df, "year")?;
            let (column, name, title) = if sub == 0 {
                ("unemployment", "open unemployment rate", "Open unemployment rate (TPT)")
            } else {
                (
                    "participation",
                    "labour force participation",
                    "Labour force participation rate (TPAK)",
                )
            };
            let values = DataProcessor::f64_column(df, column)?;
            let summary = StatsCalculator::summarize(name, &years, &values);
            Ok(page(
                selection,
                ChartSpec::line(title, "%", CategorySeries::new(years).with_series(name, values)),
                summary_insights(&summary, Unit::Percent),
            ))
        }
        (Category::Poverty, sub) => {
            let df = &ds.poverty;
            let years = DataProcessor::label_column(df, "year")?;

            match sub {
                0 => {
                    let rate = DataProcessor::f64_column(df, "rate")?;
                    let summary = StatsCalculator::summarize("poverty rate", &years, &rate);
                    Ok(page(
                        selection,
                        ChartSpec::line(
                            "Poverty rate",
                            "% of population",
                            CategorySeries::new(years).with_series("Poverty rate", rate),
                        ),
                        summary_insights(&summary, Unit::Percent),
                    ))
                }
                1 => {
                    let gini = DataProcessor::f64_column(df, "gini")?;
                    let summary = StatsCalculator::summarize("Gini ratio", &years, &gini);
                    Ok(page(
                        selection,
                        ChartSpec::line(
                            "Gini ratio",
                            "ratio",
                            CategorySeries::new(years).with_series("Gini ratio", gini),
                        ),
                        summary_insights(&summary, Unit::Ratio),
                    ))
                }
                _ => {
                    let urban = DataProcessor::f64_column(df, "urban")?;
                    let rural = DataProcessor::f64_column(df, "rural")?;
                    let summary = StatsCalculator::summarize("rural poverty", &years, &rural);
                    let mut insights = summary_insights(&summary, Unit::Percent);
                    if let (Some(u), Some(r)) = (urban.last(), rural.last()) {
                        insights.push(format!(
                            "Rural poverty exceeds urban poverty by {:.2} percentage points.",
                            r - u
                        ));
                    }
                    Ok(page(
                        selection,
                        ChartSpec::bar(
                            "Poverty rate, urban vs rural",
                            "% of population",
                            CategorySeries::new(years)
                                .with_series("Urban", urban)
                                .with_series("Rural", rural),
                        ),
                        insights,
                    ))
                }
            }
        }
        (Category::HumanDevelopment, sub) => {
            let df = DataProcessor::with_gender_gap(&ds.ipm, "male", "female")?;
            let years = DataProcessor::label_column(&df, "year")?;

            match sub {
                0 => {
                    let total = DataProcessor::f64_column(&df, "total")?;
                    let summary = StatsCalculator::summarize("IPM", &years, &total);
                    Ok(page(
                        selection,
                        ChartSpec::line(
                            "Human Development Index (IPM)",
                            "index",
                            CategorySeries::new(years).with_series("IPM", total),
                        ),
                        summary_insights(&summary, Unit::Index),
                    ))
                }
                1 => {
                    let male = DataProcessor::f64_column(&df, "male")?;
                    let female = DataProcessor::f64_column(&df, "female")?;
                    let summary = StatsCalculator::summarize("female IPM", &years, &female);
                    Ok(page(
                        selection,
                        ChartSpec::line(
                            "IPM by gender",
                            "index",
                            CategorySeries::new(years)
                                .with_series("Male", male)
                                .with_series("Female", female),
                        ),
                        summary_insights(&summary, Unit::Index),
                    ))
                }
                _ => {
                    let gap = DataProcessor::f64_column(&df, "gender_gap")?;
                    let summary = StatsCalculator::summarize("IPM gender gap", &years, &gap);
                    Ok(page(
                        selection,
                        ChartSpec::bar(
                            "IPM gender gap (male - female)",
                            "index points",
                            CategorySeries::new(years).with_series("Gap", gap),
                        ),
                        summary_insights(&summary, Unit::Index),
                    ))
                }
            }
        }
    }
}

fn growth_page(selection: Selection, growth: &GrowthData) -> PageContent {
    let loaded = match growth {
        GrowthData::Loaded(loaded) => loaded,
        GrowthData::Failed(message) => {
            return placeholder(selection, String::new(), message.clone());
        }
    };

    let series = &loaded.series;
    let summary = StatsCalculator::summarize("GDP growth", &series.labels(), &series.values());
    let mut insights = summary_insights(&summary, Unit::Percent);
    insights.extend(same_quarter_insight(series, Unit::Percent));

    let mut content = page(
        selection,
        ChartSpec::line(
            "GDP growth, year on year",
            "%",
            CategorySeries::new(series.labels()).with_series("y-o-y", series.values()),
        ),
        insights,
    );
    content.notice = loaded.notice().map(|n| Notice::Warning(n.to_string()));
    content
}

/// ADHK growth against the same quarter a year earlier and against the previous quarter.
fn adhk_growth_page(selection: Selection, levels: &TimeSeries) -> PageContent {
    let labels = levels.labels();
    let values = levels.values();
    let yoy = TimeSeries::from_pairs(
        "ADHK y-o-y",
        labels.iter().cloned().zip(year_over_year(&values, QUARTERS_PER_YEAR)),
    );
    let qtq = TimeSeries::from_pairs(
        "ADHK q-to-q",
        labels.iter().cloned().zip(quarter_over_quarter(&values)),
    );

    let summaries = StatsCalculator::summarize_all_parallel(&[yoy.clone(), qtq.clone()]);
    let mut insights = summaries
        .get(&yoy.name)
        .map(|s| summary_insights(s, Unit::Percent))
        .unwrap_or_default();
    if let Some(s) = summaries.get(&qtq.name) {
        if let (Some(latest), Some(at)) = (s.latest, s.latest_at.as_deref()) {
            insights.push(format!(
                "Latest q-to-q change: {} ({}).",
                Unit::Percent.format(latest),
                at
            ));
        }
    }

    page(
        selection,
        ChartSpec::line(
            "GDP at constant prices (ADHK), growth",
            "%",
            CategorySeries::new(labels)
                .with_series("y-o-y", yoy.values())
                .with_series("q-to-q", qtq.values()),
        ),
        insights,
    )
}

fn canned_note(selection: Selection) -> &'static str {
    match (selection.category, selection.sub_index) {
        (Category::NationalAccounts, 0) => {
            "Growth is measured on GDP at constant prices against the same quarter a year earlier."
        }
        (Category::NationalAccounts, 1) => {
            "Quarter-on-quarter figures carry a seasonal pattern; compare like quarters."
        }
        (Category::NationalAccounts, 2) => {
            "Darker cells mark stronger growth; empty cells have no published figure."
        }
        (Category::NationalAccounts, 3) => {
            "The gap between ADHB and ADHK reflects price changes since the base year."
        }
        (Category::NationalAccounts, _) => {
            "The first four quarters have no y-o-y figure because the earlier year is not shown."
        }
        (Category::PriceIndex, _) => "Inflation is the y-o-y change of the consumer price index.",
        (Category::Trade, _) => "A positive balance means exports exceeded imports in that year.",
        (Category::Budget, _) => "Realization above 100% means spending or revenue beat the plan.",
        (Category::Employment, _) => "Rates refer to the population aged 15 and over.",
        (Category::Poverty, _) => "The Gini ratio ranges from 0 (equal) to 1 (unequal).",
        (Category::HumanDevelopment, _) => {
            "IPM combines health, education and living-standard dimensions."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{fallback_series, DataSource, TimeSeries};
    use std::path::PathBuf;

    fn ctx(growth: GrowthData) -> DataContext {
        DataContext {
            growth,
            datasets: SampleDatasets::build().unwrap(),
        }
    }

    fn first_page() -> Selection {
        Selection::new(Category::NationalAccounts, 0).unwrap()
    }

    #[test]
    fn every_page_has_a_chart_with_sample_data() {
        let ctx = ctx(GrowthData::Loaded(LoadedSeries {
            series: TimeSeries::from_pairs("g", [("2024 Q1", 5.11), ("2024 Q2", 5.05)]),
            source: DataSource::File(PathBuf::from("growth.csv")),
        }));
        let pages = build_all_pages(&ctx);

        assert_eq!(pages.len(), Selection::all().len());
        for (selection, page) in &pages {
            assert!(page.chart.is_some(), "{:?} has no chart", selection);
            assert!(page.notice.is_none(), "{:?} has a notice", selection);
            assert!(!page.insights.is_empty());
            assert!(page.title.contains(selection.sub_label()));
        }
    }

    #[test]
    fn fallback_growth_carries_warning() {
        let ctx = ctx(GrowthData::Loaded(LoadedSeries {
            series: fallback_series(),
            source: DataSource::Fallback {
                notice: "missing".to_string(),
            },
        }));
        let page = build_page(first_page(), &ctx);
        assert!(page.chart.is_some());
        assert_eq!(page.notice, Some(Notice::Warning("missing".to_string())));
    }

    #[test]
    fn failed_growth_shows_placeholder_only_on_growth_page() {
        let ctx = ctx(GrowthData::Failed("bad csv".to_string()));
        let page = build_page(first_page(), &ctx);
        assert!(page.chart.is_none());
        assert_eq!(page.notice, Some(Notice::Error("bad csv".to_string())));
        assert_eq!(page.title, "National Accounts - Growth y-o-y");

        let other = build_page(Selection::new(Category::Poverty, 1).unwrap(), &ctx);
        assert!(other.chart.is_some());
    }

    #[test]
    fn heatmap_page_uses_quarter_tuples() {
        let ctx = ctx(GrowthData::Failed(String::new()));
        let page = build_page(Selection::new(Category::NationalAccounts, 2).unwrap(), &ctx);
        let Some(ChartSpec {
            body: crate::charts::ChartBody::Heatmap(matrix),
            ..
        }) = page.chart
        else {
            panic!("expected heatmap");
        };
        assert_eq!(matrix.years, vec![2019, 2020, 2021, 2022, 2023, 2024]);
        assert_eq!(matrix.get(2020, 2), Some(-5.32));
    }

    #[test]
    fn adhk_growth_compares_four_quarters_back() {
        let ctx = ctx(GrowthData::Failed(String::new()));
        let levels = &ctx.datasets.gdp_constant_quarterly;
        let page = build_page(Selection::new(Category::NationalAccounts, 4).unwrap(), &ctx);

        let Some(ChartSpec {
            body: crate::charts::ChartBody::Line(data),
            ..
        }) = page.chart
        else {
            panic!("expected line chart");
        };
        assert_eq!(data.series.len(), 2);
        let yoy = &data.series[0].values;
        assert!(yoy[..4].iter().all(|v| v.is_nan()));

        let values = levels.values();
        assert!((yoy[4] - (values[4] / values[0] - 1.0) * 100.0).abs() < 1e-9);
        assert!(page.insights[0].starts_with("Latest ADHK y-o-y:"));
        assert!(page.insights.iter().any(|l| l.starts_with("Latest q-to-q change:")));
    }

    #[test]
    fn growth_page_compares_same_quarter_last_year() {
        let ctx = ctx(GrowthData::Loaded(LoadedSeries {
            series: TimeSeries::from_pairs(
                "g",
                [("2023 Q2", 5.17), ("2024 Q1", 5.11), ("2024 Q2", 5.05)],
            ),
            source: DataSource::File(PathBuf::from("growth.csv")),
        }));
        let page = build_page(first_page(), &ctx);
        assert!(page
            .insights
            .contains(&"2024 Q2 is down 0.12 percentage points on 2023 Q2 (5.17%).".to_string()));
    }
}
