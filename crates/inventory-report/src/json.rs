//! Machine-readable benchmark report.

use crate::error::ReportError;
use chrono::{DateTime, Utc};
use inventory_workload::{AggregateSummary, CrossRunStatistics, OperationCounts};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// One run's row in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// One-based run number.
    pub run: usize,
    pub total_duration_ms: f64,
    pub read_total_ms: f64,
    pub write_total_ms: f64,
    pub read_average_ms: f64,
    pub write_average_ms: f64,
    pub counts: OperationCounts,
}

/// Full report: where it ran, how it was configured, and what it measured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport<E, C> {
    pub generated_at: DateTime<Utc>,
    pub environment: E,
    pub config: C,
    pub runs: Vec<RunReport>,
    pub summary: AggregateSummary,
}

impl<E: Serialize, C: Serialize> BenchReport<E, C> {
    pub fn new(environment: E, config: C, stats: &CrossRunStatistics) -> Self {
        let runs = stats
            .runs()
            .iter()
            .zip(stats.run_totals_ms())
            .map(|(run, total)| RunReport {
                run: run.run_index + 1,
                total_duration_ms: *total,
                read_total_ms: run.read_total_ms(),
                write_total_ms: run.write_total_ms(),
                read_average_ms: run.read_average_ms(),
                write_average_ms: run.write_average_ms(),
                counts: run.counts,
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            environment,
            config,
            runs,
            summary: stats.summary(),
        }
    }
}

/// Write `report` as pretty-printed JSON.
pub fn write_json_report<T: Serialize>(report: &T, path: &Path) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(report)?;
    write_file(path, &json)?;
    info!("JSON report written to: {}", path.display());
    Ok(())
}

/// Write a rendered markdown report.
pub fn write_markdown_report(markdown: &str, path: &Path) -> Result<(), ReportError> {
    write_file(path, markdown)?;
    info!("Markdown report written to: {}", path.display());
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
