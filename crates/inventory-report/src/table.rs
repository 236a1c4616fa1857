//! Human-readable summaries of a set of runs.

use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use inventory_workload::CrossRunStatistics;

/// Render a per-run table followed by the cross-run averages and maxima.
pub fn format_table(stats: &CrossRunStatistics) -> String {
    let mut output = String::new();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Run",
        "Total",
        "Read Time",
        "Write Time",
        "Avg Read",
        "Avg Write",
        "Queries",
        "Updates",
        "Stores Added",
        "Products Added",
    ]);

    for (run, total_ms) in stats.runs().iter().zip(stats.run_totals_ms()) {
        table.add_row(vec![
            Cell::new(run.run_index + 1),
            Cell::new(format_duration_ms(*total_ms)),
            Cell::new(format_duration_ms(run.read_total_ms())),
            Cell::new(format_duration_ms(run.write_total_ms())),
            Cell::new(format_duration_ms(run.read_average_ms())),
            Cell::new(format_duration_ms(run.write_average_ms())),
            Cell::new(format_number(run.counts.query_stock)),
            Cell::new(format_number(run.counts.update_inventory)),
            Cell::new(format_number(run.counts.add_store)),
            Cell::new(format_number(run.counts.add_product)),
        ]);
    }

    let summary = stats.summary();
    let totals = summary.total_counts;
    table.add_row(vec![
        Cell::new("AVERAGE").fg(Color::Cyan),
        Cell::new(format_duration_ms(summary.average_total_duration_ms)),
        Cell::new(format_duration_ms(summary.average_read_duration_ms)),
        Cell::new(format_duration_ms(summary.average_write_duration_ms)),
        Cell::new("-"),
        Cell::new("-"),
        Cell::new(format_number(totals.query_stock)),
        Cell::new(format_number(totals.update_inventory)),
        Cell::new(format_number(totals.add_store)),
        Cell::new(format_number(totals.add_product)),
    ]);

    output.push_str(&table.to_string());
    output.push('\n');
    output.push_str(&format!(
        "Runs: {}  |  Max total: {}  |  Max read: {}  |  Max write: {}\n",
        summary.runs,
        format_duration_ms(summary.max_total_duration_ms),
        format_duration_ms(summary.max_read_total_ms),
        format_duration_ms(summary.max_write_total_ms),
    ));
    output.push_str("Operation counts in the AVERAGE row are totals across runs.\n");

    output
}

/// Render the same summary as a markdown document.
pub fn format_markdown(stats: &CrossRunStatistics) -> String {
    let summary = stats.summary();
    let totals = summary.total_counts;
    let mut output = String::new();

    output.push_str("# Inventory Benchmark Results\n\n");
    output.push_str("## Summary\n\n");
    output.push_str(&format!("- **Runs:** {}\n", summary.runs));
    output.push_str(&format!(
        "- **Average Total Duration:** {}\n",
        format_duration_ms(summary.average_total_duration_ms)
    ));
    output.push_str(&format!(
        "- **Average Read Duration:** {}\n",
        format_duration_ms(summary.average_read_duration_ms)
    ));
    output.push_str(&format!(
        "- **Average Write Duration:** {}\n",
        format_duration_ms(summary.average_write_duration_ms)
    ));
    output.push_str(&format!(
        "- **Max Total Duration:** {}\n",
        format_duration_ms(summary.max_total_duration_ms)
    ));
    output.push_str(&format!(
        "- **Max Read Time:** {}\n",
        format_duration_ms(summary.max_read_total_ms)
    ));
    output.push_str(&format!(
        "- **Max Write Time:** {}\n",
        format_duration_ms(summary.max_write_total_ms)
    ));
    output.push_str(&format!(
        "- **Total Operations:** {}\n\n",
        format_number(totals.total())
    ));

    output.push_str("## Runs\n\n");
    output.push_str(
        "| Run | Total | Read Time | Write Time | Queries | Updates | Stores Added | Products Added |\n",
    );
    output.push_str(
        "|-----|-------|-----------|------------|---------|---------|--------------|----------------|\n",
    );
    for (run, total_ms) in stats.runs().iter().zip(stats.run_totals_ms()) {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
            run.run_index + 1,
            format_duration_ms(*total_ms),
            format_duration_ms(run.read_total_ms()),
            format_duration_ms(run.write_total_ms()),
            format_number(run.counts.query_stock),
            format_number(run.counts.update_inventory),
            format_number(run.counts.add_store),
            format_number(run.counts.add_product),
        ));
    }

    output
}

/// Format a millisecond duration in a human-readable unit.
pub fn format_duration_ms(ms: f64) -> String {
    // Branch on the value as it will be printed so no unit overflows.
    if ms < 999.995 {
        format!("{ms:.2}ms")
    } else if ms < 59_995.0 {
        format!("{:.2}s", ms / 1000.0)
    } else if ms < 3_599_500.0 {
        let secs = (ms / 1000.0).round() as u64;
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        let mins = (ms / 60_000.0).round() as u64;
        format!("{}h {:02}m", mins / 60, mins % 60)
    }
}

/// Format number with thousands separators.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_model::OperationKind;
    use inventory_workload::{RunStatistics, TimingSample};

    fn run(index: usize, read_ms: f64, write_ms: f64) -> RunStatistics {
        let mut stats = RunStatistics::new(index);
        stats.record(TimingSample {
            kind: OperationKind::ReadStock,
            duration_ms: read_ms,
        });
        stats.record(TimingSample {
            kind: OperationKind::AddProduct,
            duration_ms: write_ms,
        });
        stats
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(0.0), "0.00ms");
        assert_eq!(format_duration_ms(12.5), "12.50ms");
        assert_eq!(format_duration_ms(2500.0), "2.50s");
        assert_eq!(format_duration_ms(65_000.0), "1m 05s");
        assert_eq!(format_duration_ms(3_661_000.0), "1h 01m");
    }

    #[test]
    fn test_format_duration_ms_carries_rounded_seconds() {
        assert_eq!(format_duration_ms(119_600.0), "2m 00s");
        assert_eq!(format_duration_ms(999.999), "1.00s");
        assert_eq!(format_duration_ms(59_999.0), "1m 00s");
        assert_eq!(format_duration_ms(60_400.0), "1m 00s");
        assert_eq!(format_duration_ms(3_599_999.0), "1h 00m");
        assert_eq!(format_duration_ms(7_199_999.0), "2h 00m");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_table_lists_every_run() {
        let stats = CrossRunStatistics::new()
            .fold(run(0, 10.0, 20.0), 100.0)
            .fold(run(1, 30.0, 40.0), 300.0);

        let table = format_table(&stats);

        assert!(table.contains("Run"));
        assert!(table.contains("AVERAGE"));
        assert!(table.contains("200.00ms"));
        assert!(table.contains("Runs: 2"));
        assert!(table.contains("Max total: 300.00ms"));
    }

    #[test]
    fn test_format_table_without_runs() {
        let table = format_table(&CrossRunStatistics::new());

        assert!(table.contains("AVERAGE"));
        assert!(table.contains("Runs: 0"));
    }

    #[test]
    fn test_format_markdown() {
        let stats = CrossRunStatistics::new().fold(run(0, 10.0, 20.0), 100.0);

        let md = format_markdown(&stats);

        assert!(md.starts_with("# Inventory Benchmark Results"));
        assert!(md.contains("- **Runs:** 1"));
        assert!(md.contains("- **Average Read Duration:** 10.00ms"));
        assert!(md.contains("| 1 | 100.00ms | 10.00ms | 20.00ms | 1 | 0 | 0 | 1 |"));
    }
}
