//! Chart and report files on disk.

use inventory_model::OperationKind;
use inventory_report::{
    format_markdown, write_json_report, write_markdown_report, BenchReport, SvgChartSink,
};
use inventory_workload::{ChartError, ChartSink, CrossRunStatistics, RunStatistics, TimingSample};
use serde::Serialize;
use std::path::Path;
use tempfile::TempDir;

#[derive(Serialize)]
struct Config {
    runs: usize,
    operations: usize,
}

fn stats() -> CrossRunStatistics {
    let mut first = RunStatistics::new(0);
    first.record(TimingSample {
        kind: OperationKind::ReadStock,
        duration_ms: 4.0,
    });
    first.record(TimingSample {
        kind: OperationKind::WriteInventory,
        duration_ms: 6.0,
    });
    let mut second = RunStatistics::new(1);
    second.record(TimingSample {
        kind: OperationKind::AddStore,
        duration_ms: 8.0,
    });

    CrossRunStatistics::new()
        .fold(first, 50.0)
        .fold(second, 70.0)
}

#[test]
fn test_svg_sink_writes_chart() {
    let dir = TempDir::new().unwrap();
    let sink = SvgChartSink::new(dir.path());

    sink.render_series(
        "Performance for Run 1",
        &["Total Time", "Read Time", "Write Time"],
        &[50.0, 4.0, 6.0],
        Path::new("performance_run_1.svg"),
    )
    .unwrap();

    let svg = std::fs::read_to_string(dir.path().join("performance_run_1.svg")).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains("Performance for Run 1"));
    assert!(svg.contains("Write Time"));
}

#[test]
fn test_svg_sink_creates_output_dir() {
    let dir = TempDir::new().unwrap();
    let sink = SvgChartSink::new(dir.path().join("charts").join("nested"));

    sink.render_series("Counts", &["a"], &[1.0], Path::new("counts.svg"))
        .unwrap();

    assert!(dir.path().join("charts/nested/counts.svg").exists());
}

#[test]
fn test_svg_sink_rejects_invalid_series() {
    let dir = TempDir::new().unwrap();
    let sink = SvgChartSink::new(dir.path());

    let mismatched = sink.render_series("x", &["a", "b"], &[1.0], Path::new("x.svg"));
    let negative = sink.render_series("x", &["a"], &[-2.0], Path::new("x.svg"));

    assert!(matches!(mismatched, Err(ChartError::InvalidSeries(_))));
    assert!(matches!(negative, Err(ChartError::InvalidSeries(_))));
    assert!(!dir.path().join("x.svg").exists());
}

#[test]
fn test_json_report_round_trips_summary() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.json");
    let report = BenchReport::new(
        "test-host",
        Config {
            runs: 2,
            operations: 3,
        },
        &stats(),
    );

    write_json_report(&report, &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["environment"], "test-host");
    assert_eq!(value["config"]["operations"], 3);
    assert_eq!(value["runs"].as_array().unwrap().len(), 2);
    assert_eq!(value["runs"][1]["run"], 2);
    assert_eq!(value["runs"][1]["counts"]["add_store"], 1);
    assert_eq!(value["summary"]["runs"], 2);
    assert_eq!(value["summary"]["average_total_duration_ms"], 60.0);
    assert_eq!(value["summary"]["average_read_duration_ms"], 2.0);
    assert_eq!(value["summary"]["max_write_total_ms"], 8.0);
}

#[test]
fn test_markdown_report_is_written() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("report.md");

    write_markdown_report(&format_markdown(&stats()), &path).unwrap();

    let md = std::fs::read_to_string(&path).unwrap();
    assert!(md.contains("## Runs"));
    assert!(md.contains("| 2 | 70.00ms |"));
}
