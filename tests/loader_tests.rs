use econ_dashboard::data::{fallback_series, load_growth_series, DataSource, LoaderError};
use std::io::Write;
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}

#[test]
fn well_formed_csv_keeps_every_row() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "growth.csv",
        "Triwulan,Pertumbuhan\n2011 Q1,6.48\n2011 Q2,6.27\n2011 Q3,6.01\n2011 Q4,5.94\n",
    );

    let loaded = load_growth_series(&path).unwrap();

    assert_eq!(loaded.source, DataSource::File(path.clone()));
    assert!(!loaded.is_fallback());
    assert!(loaded.notice().is_none());
    assert_eq!(loaded.series.len(), 4);
    assert_eq!(loaded.series.points[0].period, "2011 Q1");
    assert!((loaded.series.points[3].value - 5.94).abs() < 1e-9);
}

#[test]
fn missing_file_uses_fallback_without_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does_not_exist.csv");

    let loaded = load_growth_series(&path).unwrap();

    assert!(loaded.is_fallback());
    assert!(loaded.notice().unwrap().contains("does_not_exist.csv"));
    assert_eq!(loaded.series, fallback_series());
}

#[test]
fn extra_columns_are_ignored() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "wide.csv",
        "period,growth,note\n2020 Q1,2.97,a\n2020 Q2,-5.32,b\n",
    );

    let loaded = load_growth_series(&path).unwrap();
    assert_eq!(loaded.series.values(), vec![2.97, -5.32]);
}

#[test]
fn non_numeric_growth_becomes_gap() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "gaps.csv", "period,growth\n2020 Q1,2.97\n2020 Q2,n/a\n");

    let loaded = load_growth_series(&path).unwrap();
    assert_eq!(loaded.series.len(), 2);
    assert!(loaded.series.points[1].value.is_nan());
    assert_eq!(loaded.series.latest().map(|p| p.value), Some(2.97));
}

#[test]
fn single_column_csv_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "narrow.csv", "period\n2020 Q1\n2020 Q2\n");

    let err = load_growth_series(&path).unwrap_err();
    assert!(matches!(err, LoaderError::ColumnCount(1)));
    assert!(err.to_string().contains("at least 2 columns"));
}

#[test]
fn empty_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "empty.csv", "");

    let err = load_growth_series(&path).unwrap_err();
    assert!(matches!(err, LoaderError::CsvError(_)));
    assert!(err.to_string().starts_with("Failed to load CSV"));
}

#[test]
fn directory_path_is_an_error_not_a_fallback() {
    let dir = TempDir::new().unwrap();

    let err = load_growth_series(dir.path()).unwrap_err();
    assert!(matches!(err, LoaderError::CsvError(_)));
}

#[test]
fn unreadable_path_reports_io_error() {
    let dir = TempDir::new().unwrap();
    let file = write_csv(&dir, "growth.csv", "period,growth\n2020 Q1,2.97\n");
    // A regular file used as a directory component: not "not found".
    let path = file.join("nested.csv");

    let err = load_growth_series(&path).unwrap_err();
    assert!(matches!(err, LoaderError::Io { .. }));
    assert!(err.to_string().contains("nested.csv"));
}

#[test]
fn header_only_csv_gives_empty_series() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "header.csv", "period,growth\n");

    let loaded = load_growth_series(&path).unwrap();
    assert!(!loaded.is_fallback());
    assert!(loaded.series.is_empty());
}

#[test]
fn blank_period_rows_are_dropped_and_empty_growth_is_gap() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "holes.csv",
        "period,growth\n2020 Q1,2.97\n,1.00\n2020 Q3,\n",
    );

    let loaded = load_growth_series(&path).unwrap();
    assert_eq!(loaded.series.labels(), vec!["2020 Q1", "2020 Q3"]);
    assert!(loaded.series.points[1].value.is_nan());
}

#[test]
fn semicolon_delimited_file_reads_as_one_column() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "semi.csv", "period;growth\n2020 Q1;2.97\n");

    let err = load_growth_series(&path).unwrap_err();
    assert!(matches!(err, LoaderError::ColumnCount(1)));
}
