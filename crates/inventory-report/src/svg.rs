//! SVG bar chart sink.

use inventory_workload::{ChartError, ChartSink};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const SVG_WIDTH: f64 = 720.0;
const SVG_HEIGHT: f64 = 420.0;
const SVG_TOP_MARGIN: f64 = 56.0;
const SVG_BOTTOM_MARGIN: f64 = 56.0;
const SVG_LEFT_MARGIN: f64 = 72.0;
const SVG_RIGHT_MARGIN: f64 = 24.0;
const SVG_TICKS: usize = 4;
const BAR_COLORS: [&str; 4] = ["#4c78a8", "#f58518", "#54a24b", "#e45756"];

/// Writes each series as an SVG bar chart under `output_dir`.
#[derive(Debug, Clone)]
pub struct SvgChartSink {
    output_dir: PathBuf,
}

impl SvgChartSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl ChartSink for SvgChartSink {
    fn render_series(
        &self,
        title: &str,
        labels: &[&str],
        values: &[f64],
        destination: &Path,
    ) -> Result<(), ChartError> {
        validate_series(labels, values)?;

        let path = self.output_dir.join(destination);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, build_svg(title, labels, values))?;
        debug!("Wrote chart {}", path.display());
        Ok(())
    }
}

fn validate_series(labels: &[&str], values: &[f64]) -> Result<(), ChartError> {
    if labels.len() != values.len() {
        return Err(ChartError::InvalidSeries(format!(
            "{} labels for {} values",
            labels.len(),
            values.len()
        )));
    }
    if values.is_empty() {
        return Err(ChartError::InvalidSeries("empty series".to_string()));
    }
    if let Some((label, value)) = labels
        .iter()
        .zip(values)
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        return Err(ChartError::InvalidSeries(format!(
            "value {value} for '{label}' is not a finite non-negative number"
        )));
    }
    Ok(())
}

fn build_svg(title: &str, labels: &[&str], values: &[f64]) -> String {
    let plot_width = SVG_WIDTH - SVG_LEFT_MARGIN - SVG_RIGHT_MARGIN;
    let plot_height = SVG_HEIGHT - SVG_TOP_MARGIN - SVG_BOTTOM_MARGIN;
    let baseline = SVG_TOP_MARGIN + plot_height;
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    let scale_max = if max > 0.0 { max } else { 1.0 };

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{SVG_WIDTH}\" height=\"{SVG_HEIGHT}\" viewBox=\"0 0 {SVG_WIDTH} {SVG_HEIGHT}\">"
    ));
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{SVG_WIDTH}\" height=\"{SVG_HEIGHT}\" fill=\"#ffffff\"/>"
    ));
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"28\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"16\">{}</text>",
        SVG_WIDTH / 2.0,
        xml_escape(title)
    ));

    for tick in 0..=SVG_TICKS {
        let value = scale_max * tick as f64 / SVG_TICKS as f64;
        let y = baseline - plot_height * tick as f64 / SVG_TICKS as f64;
        svg.push_str(&format!(
            "<line x1=\"{SVG_LEFT_MARGIN}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#dddddd\"/>",
            SVG_WIDTH - SVG_RIGHT_MARGIN
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-family=\"monospace\" font-size=\"11\">{}</text>",
            SVG_LEFT_MARGIN - 6.0,
            y + 4.0,
            format_value(value)
        ));
    }

    let slot = plot_width / values.len() as f64;
    let bar_width = slot * 0.6;
    for (idx, (label, value)) in labels.iter().zip(values).enumerate() {
        let height = plot_height * value / scale_max;
        let x = SVG_LEFT_MARGIN + slot * idx as f64 + (slot - bar_width) / 2.0;
        let y = baseline - height;
        let center = x + bar_width / 2.0;
        svg.push_str(&format!(
            "<rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{bar_width:.1}\" height=\"{height:.1}\" fill=\"{}\"/>",
            BAR_COLORS[idx % BAR_COLORS.len()]
        ));
        svg.push_str(&format!(
            "<text x=\"{center:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-family=\"monospace\" font-size=\"11\">{}</text>",
            y - 6.0,
            format_value(*value)
        ));
        svg.push_str(&format!(
            "<text x=\"{center:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"12\">{}</text>",
            baseline + 20.0,
            xml_escape(label)
        ));
    }

    svg.push_str(&format!(
        "<line x1=\"{SVG_LEFT_MARGIN}\" y1=\"{SVG_TOP_MARGIN}\" x2=\"{SVG_LEFT_MARGIN}\" y2=\"{baseline}\" stroke=\"#333333\"/>"
    ));
    svg.push_str("</svg>");
    svg
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn xml_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
