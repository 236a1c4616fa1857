//! Repeated-run benchmark driver.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use inventory_generator::FakeRecordGenerator;
use inventory_store::{seed_sales, seed_stores, InventoryStore, StoreError};
use inventory_workload::{
    render_blocking, shared_generator, ChartSink, CrossRunStatistics, OperationContext, SchedulerError,
    WorkloadScheduler,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort a benchmark.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Seeding failed: {0}")]
    Seed(#[from] StoreError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// Parameters of a benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Number of repeated runs.
    pub runs: usize,
    /// Operations dispatched per run.
    pub operations: usize,
    /// Share of the available cores used as workers.
    pub concurrency_fraction: f64,
    /// Sales seeded per run.
    pub sales: usize,
    /// Stores seeded per run.
    pub stores: usize,
    pub min_products: usize,
    pub max_products: usize,
    /// Seed for generation and operation selection; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            runs: 10,
            operations: 1000,
            concurrency_fraction: 0.5,
            sales: 50,
            stores: 5,
            min_products: 5,
            max_products: 20,
            seed: None,
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<(), BenchError> {
        if !(self.concurrency_fraction > 0.0 && self.concurrency_fraction <= 1.0) {
            return Err(BenchError::InvalidConfig(format!(
                "concurrency fraction must be in (0, 1], got {}",
                self.concurrency_fraction
            )));
        }
        if self.stores == 0 && self.operations > 0 {
            return Err(BenchError::InvalidConfig(
                "at least one store is required to run operations".to_string(),
            ));
        }
        if self.min_products > self.max_products {
            return Err(BenchError::InvalidConfig(format!(
                "min products ({}) exceeds max products ({})",
                self.min_products, self.max_products
            )));
        }
        Ok(())
    }
}

/// Run the benchmark `config.runs` times against `store`.
///
/// Each run seeds fresh stores and sales, then simulates the workload; the
/// run's total duration covers both. Charts for every run and for the
/// averages are rendered through `sink` once all runs are done.
pub async fn measure_performance(
    store: Arc<dyn InventoryStore>,
    config: &BenchConfig,
    sink: &dyn ChartSink,
) -> Result<CrossRunStatistics, BenchError> {
    config.validate()?;

    let generator = shared_generator(match config.seed {
        Some(seed) => FakeRecordGenerator::new(seed),
        None => FakeRecordGenerator::from_entropy(),
    });
    let mut sales_rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    let context = OperationContext::new(Arc::clone(&store), Arc::clone(&generator))
        .with_new_store_products(config.min_products, config.max_products);
    let progress = MultiProgress::new();
    let runs_bar = progress.add(progress_bar(config.runs as u64, "Simulation Runs"));
    let operations_bar = progress.add(progress_bar(
        config.operations as u64,
        "Operations Progress",
    ));
    let mut scheduler = WorkloadScheduler::new(context).with_progress(operations_bar.clone());
    if let Some(seed) = config.seed {
        scheduler = scheduler.with_seed(seed.wrapping_add(2));
    }

    info!(
        "Starting benchmark: {} runs of {} operations, concurrency fraction {}",
        config.runs, config.operations, config.concurrency_fraction
    );

    let mut results = CrossRunStatistics::new();
    for run_index in 0..config.runs {
        let run_number = run_index + 1;
        let start_time = Instant::now();

        let stores = {
            let mut generator = generator.lock().await;
            let (stores, mut seeded) = seed_stores(
                store.as_ref(),
                &mut **generator,
                config.stores,
                config.min_products,
                config.max_products,
            )
            .await?;
            let sales = seed_sales(
                store.as_ref(),
                &mut **generator,
                &mut sales_rng,
                &stores,
                config.sales,
            )
            .await?;
            seeded.merge(&sales);
            info!(
                "Run {}: seeded {} stores, {} products and {} sales in {:?}",
                run_number,
                seeded.stores_inserted,
                seeded.products_inserted,
                seeded.sales_inserted,
                seeded.total_duration
            );
            stores
        };

        let stats = scheduler
            .run(
                config.operations,
                &stores,
                config.concurrency_fraction,
                run_index,
                sink,
            )
            .await?;
        let total_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        info!("Run {} completed in {:.2} ms", run_number, total_ms);
        info!(
            "Run {}: query_stock={} update_inventory={} add_store={} add_product={}",
            run_number,
            stats.counts.query_stock,
            stats.counts.update_inventory,
            stats.counts.add_store,
            stats.counts.add_product
        );
        results.push(stats, total_ms);
        runs_bar.inc(1);
        info!(
            "Run {}: running average read time {:.2} ms, write time {:.2} ms",
            run_number,
            results.average_read_duration(),
            results.average_write_duration()
        );
    }

    operations_bar.finish_and_clear();
    runs_bar.finish();

    let summary = results.summary();
    info!("=== Benchmark Summary ===");
    info!("Runs: {}", summary.runs);
    info!(
        "Average total duration: {:.2} ms (max {:.2} ms)",
        summary.average_total_duration_ms, summary.max_total_duration_ms
    );
    info!(
        "Average read duration: {:.2} ms (max {:.2} ms)",
        summary.average_read_duration_ms, summary.max_read_total_ms
    );
    info!(
        "Average write duration: {:.2} ms (max {:.2} ms)",
        summary.average_write_duration_ms, summary.max_write_total_ms
    );
    info!(
        "Operations: query_stock={} update_inventory={} add_store={} add_product={}",
        summary.total_counts.query_stock,
        summary.total_counts.update_inventory,
        summary.total_counts.add_store,
        summary.total_counts.add_product
    );

    render_performance_charts(sink, &results);
    Ok(results)
}

fn progress_bar(length: u64, prefix: &'static str) -> ProgressBar {
    let style = ProgressStyle::with_template(
        "{prefix:>20} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    let bar = ProgressBar::new(length).with_style(style);
    bar.set_prefix(prefix);
    bar
}

fn render_performance_charts(sink: &dyn ChartSink, results: &CrossRunStatistics) {
    for (run, total_ms) in results.runs().iter().zip(results.run_totals_ms()) {
        let run_number = run.run_index + 1;
        render(
            sink,
            &format!("Performance for Run {run_number}"),
            &["Total Time", "Read Time", "Write Time"],
            &[*total_ms, run.read_total_ms(), run.write_total_ms()],
            &format!("performance_run_{run_number}.svg"),
        );
    }

    render(
        sink,
        "Aggregate Performance",
        &["Average Total Time", "Average Read Time", "Average Write Time"],
        &[
            results.average_total_duration(),
            results.average_read_duration(),
            results.average_write_duration(),
        ],
        "aggregate_performance.svg",
    );
}

fn render(sink: &dyn ChartSink, title: &str, labels: &[&str], values: &[f64], file: &str) {
    if let Err(e) = render_blocking(sink, title, labels, values, Path::new(file)) {
        warn!("Failed to render chart {}: {}", file, e);
    }
}
