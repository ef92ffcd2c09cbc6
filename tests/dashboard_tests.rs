use econ_dashboard::content::{Category, Notice};
use econ_dashboard::export::{export_page_json, suggested_file_name};
use econ_dashboard::{
    build_all_pages, build_page, load_growth_series, AppConfig, DataContext, GrowthData,
    SampleDatasets, Selection,
};
use tempfile::TempDir;

fn context_from_csv(dir: &TempDir, body: &str) -> DataContext {
    let path = dir.path().join("growth.csv");
    std::fs::write(&path, body).unwrap();
    DataContext {
        growth: GrowthData::Loaded(load_growth_series(&path).unwrap()),
        datasets: SampleDatasets::build().unwrap(),
    }
}

#[test]
fn growth_page_reflects_csv_rows() {
    let dir = TempDir::new().unwrap();
    let ctx = context_from_csv(&dir, "period,growth\n2024 Q1,5.11\n2024 Q2,5.05\n2024 Q3,4.95\n");

    let page = build_page(Selection::new(Category::NationalAccounts, 0).unwrap(), &ctx);
    let json = serde_json::to_value(&page).unwrap();

    assert_eq!(json["chart"]["body"]["kind"], "line");
    let categories = json["chart"]["body"]["data"]["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 3);
    assert_eq!(page.insights[0], "Latest GDP growth: 4.95% (2024 Q3).");
    assert!(page.notice.is_none());
}

#[test]
fn missing_csv_warns_but_renders() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.csv");
    let ctx = DataContext {
        growth: GrowthData::Loaded(load_growth_series(&path).unwrap()),
        datasets: SampleDatasets::build().unwrap(),
    };

    let pages = build_all_pages(&ctx);
    let growth = &pages[&Selection::new(Category::NationalAccounts, 0).unwrap()];
    assert!(growth.chart.is_some());
    assert!(matches!(growth.notice, Some(Notice::Warning(_))));
}

#[test]
fn unreadable_csv_shows_error_on_growth_page_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("growth.csv");
    std::fs::write(&path, "").unwrap();

    let ctx = DataContext {
        growth: GrowthData::load(&path),
        datasets: SampleDatasets::build().unwrap(),
    };
    assert!(matches!(ctx.growth, GrowthData::Failed(_)));

    let pages = build_all_pages(&ctx);
    let growth = &pages[&Selection::new(Category::NationalAccounts, 0).unwrap()];
    assert!(growth.chart.is_none());
    assert!(growth.insights.is_empty());
    match &growth.notice {
        Some(Notice::Error(message)) => assert!(message.starts_with("Failed to load CSV")),
        other => panic!("expected an error notice, got {:?}", other),
    }

    let heatmap = &pages[&Selection::new(Category::NationalAccounts, 2).unwrap()];
    assert!(heatmap.chart.is_some());
    assert!(heatmap.notice.is_none());
}

#[test]
fn header_only_csv_renders_empty_growth_page() {
    let dir = TempDir::new().unwrap();
    let ctx = context_from_csv(&dir, "period,growth
");

    let page = build_page(Selection::new(Category::NationalAccounts, 0).unwrap(), &ctx);
    assert!(page.chart.is_some());
    assert!(page.notice.is_none());
    assert_eq!(page.insights[0], "No observations available for GDP growth.");
}

#[test]
fn page_exports_as_json() {
    let dir = TempDir::new().unwrap();
    let ctx = context_from_csv(&dir, "period,growth\n2024 Q1,5.11\n");
    let selection = Selection::new(Category::HumanDevelopment, 2).unwrap();
    let page = build_page(selection, &ctx);

    let out = dir.path().join(suggested_file_name(selection, "json"));
    assert_eq!(export_page_json(&page, &out).unwrap(), out);

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["title"], "Human Development - Gender gap");
    assert_eq!(written["chart"]["body"]["kind"], "bar");
    assert_eq!(written["selection"]["category"], "human_development");
}

#[test]
fn json_export_adds_missing_extension() {
    let dir = TempDir::new().unwrap();
    let ctx = context_from_csv(&dir, "period,growth
2024 Q1,5.11
");
    let page = build_page(Selection::new(Category::Trade, 1).unwrap(), &ctx);

    let written = export_page_json(&page, &dir.path().join("balance")).unwrap();
    assert_eq!(written, dir.path().join("balance.json"));
    assert!(written.is_file());
}

#[test]
fn config_file_round_trip_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dashboard.toml");
    std::fs::write(
        &path,
        "[data]\ngrowth_csv = \"pdb.csv\"\n\n[export]\nopen_after_export = true\n",
    )
    .unwrap();

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.data.growth_csv, std::path::PathBuf::from("pdb.csv"));
    assert!(config.export.open_after_export);

    let missing = AppConfig::load(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(missing, AppConfig::default());
}
