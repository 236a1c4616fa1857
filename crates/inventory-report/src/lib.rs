//! Output artifacts for the inventory benchmark.
//!
//! - [`SvgChartSink`] renders labeled series as standalone SVG bar charts
//! - [`format_table`] / [`format_markdown`] summarize a set of runs
//! - [`BenchReport`] is the machine-readable JSON report

pub mod error;
pub mod json;
pub mod svg;
pub mod table;

pub use error::ReportError;
pub use json::{write_json_report, write_markdown_report, BenchReport, RunReport};
pub use svg::SvgChartSink;
pub use table::{format_duration_ms, format_markdown, format_number, format_table};
