//! CSV exports through the full build.

use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::Path;

use decisionboard_core::extrema::ExtremaKind;
use decisionboard_core::DashboardConfig;
use decisionboard_runner::source::{DECISIONS_FILE, PROCESS_LOG_FILE, RENTABILITY_FILE};
use decisionboard_runner::{run_dashboard, CsvExportSource, RunError, SourceError};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn write(dir: &Path, file: &str, content: &str) {
    fs::write(dir.join(file), content).unwrap();
}

#[test]
fn three_row_scenario_from_exports() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        DECISIONS_FILE,
        "3,ABC,a,b,2024-01-02 11:00:00,0.95,1,0,10.0\n\
         2,ABC,a,b,2024-01-02 10:00:00,-0.95,-1,0,12.0\n\
         1,ABC,a,b,2024-01-02 09:00:00,0.10,1,0,11.0\n",
    );
    write(dir.path(), RENTABILITY_FILE, "2024-01-01,0.8,2\n2024-01-02,-0.1,1\n");
    write(dir.path(), PROCESS_LOG_FILE, "collector,0.456\nmodel,12\n");

    let source = CsvExportSource::new(dir.path());
    let run = run_dashboard(&source, &DashboardConfig::default(), now()).unwrap();
    let dashboard = &run.dashboard;

    let buy = dashboard.annotations[1].labels();
    assert_eq!(buy.len(), 3);
    assert_eq!(buy[0].kind, ExtremaKind::Last);
    assert_eq!(buy[0].value, 11.0);
    assert_eq!(buy[1].value, 11.0);
    assert_eq!(buy[2].value, 10.0);
    assert!(dashboard.annotations[0].is_empty_series());

    assert_eq!(run.metadata.counts.rentability_days, 2);
    assert_eq!(run.metadata.counts.processes, 2);
    assert_eq!(
        dashboard.latency.traces[0].text,
        Some(vec!["0.46".to_string(), "12.00".to_string()])
    );
}

#[test]
fn empty_decision_export_aborts() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), DECISIONS_FILE, "");

    let err = run_dashboard(
        &CsvExportSource::new(dir.path()),
        &DashboardConfig::default(),
        now(),
    )
    .unwrap_err();
    assert!(err.is_empty_feed());
}

#[test]
fn missing_decision_export_is_a_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_dashboard(
        &CsvExportSource::new(dir.path()),
        &DashboardConfig::default(),
        now(),
    )
    .unwrap_err();
    assert!(matches!(err, RunError::Source(SourceError::MissingExport { .. })));
    assert!(!err.is_empty_feed());
}

#[test]
fn malformed_timestamps_are_dropped_not_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        DECISIONS_FILE,
        "1,ABC,a,b,not-a-time,0.1,0,0,10.0\n\
         2,ABC,a,b,2024-01-02 11:30:00,0.2,0,0,10.5\n",
    );

    let run = run_dashboard(
        &CsvExportSource::new(dir.path()),
        &DashboardConfig::default(),
        now(),
    )
    .unwrap();
    assert_eq!(run.metadata.counts.decisions, 2);
    assert_eq!(run.metadata.counts.windowed, 1);
}

#[test]
fn missing_export_directory_is_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_dashboard(
        &CsvExportSource::new(dir.path().join("absent")),
        &DashboardConfig::default(),
        now(),
    )
    .unwrap_err();
    assert!(matches!(err, RunError::Source(SourceError::Unreachable(_))));
    assert!(!err.is_empty_feed());
}
