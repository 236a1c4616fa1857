//! Command-line interface for inventory-bench
//!
//! # Usage Examples
//!
//! ```bash
//! # Benchmark a local MongoDB with the defaults (10 runs of 1000 operations)
//! inventory-bench run --mongodb-uri mongodb://localhost:27017/ --database inventory_db
//!
//! # Dry run against the in-memory store, reproducible, with reports
//! inventory-bench run --memory --runs 3 --operations 200 --seed 42 \
//!   --output-dir charts --report charts/report.json --markdown charts/report.md
//!
//! # Show the runtime environment only
//! inventory-bench env
//! ```

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inventory_bench::{
    init_logging, log_runtime_environment, mask_connection_password, measure_performance,
    BenchConfig,
};
use inventory_report::{
    format_markdown, format_table, write_json_report, write_markdown_report, BenchReport,
    SvgChartSink,
};
use inventory_store::{InventoryStore, MemoryStore, MongoStore};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "inventory-bench")]
#[command(about = "Synthetic-data load generator and benchmark for an inventory document store")]
#[command(long_about = None)]
struct Cli {
    /// Log filter (e.g. info, debug, inventory_workload=debug); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the store and run the workload simulation repeatedly
    Run(RunArgs),

    /// Print the runtime environment and exit
    Env,
}

#[derive(Args)]
struct RunArgs {
    /// MongoDB connection string
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017/")]
    mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DATABASE", default_value = "inventory_db")]
    database: String,

    /// Use the in-memory store instead of MongoDB
    #[arg(long)]
    memory: bool,

    /// Drop the stores, products and sales collections before starting
    #[arg(long)]
    reset: bool,

    /// Number of repeated runs
    #[arg(long, default_value = "10")]
    runs: usize,

    /// Operations dispatched per run
    #[arg(long, default_value = "1000")]
    operations: usize,

    /// Share of the available cores used as workers, in (0, 1]
    #[arg(long, default_value = "0.5")]
    concurrency_fraction: f64,

    /// Sales seeded per run
    #[arg(long, default_value = "50")]
    sales: usize,

    /// Stores seeded per run
    #[arg(long, default_value = "5")]
    stores: usize,

    /// Minimum products per generated store
    #[arg(long, default_value = "5")]
    min_products: usize,

    /// Maximum products per generated store
    #[arg(long, default_value = "20")]
    max_products: usize,

    /// Random seed for reproducible data and operation mixes
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for chart files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Write a JSON report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write a markdown report to this path
    #[arg(long)]
    markdown: Option<PathBuf>,

    /// Log file, appended to
    #[arg(long, default_value = "simulation.log")]
    log_file: PathBuf,
}

impl RunArgs {
    fn bench_config(&self) -> BenchConfig {
        BenchConfig {
            runs: self.runs,
            operations: self.operations,
            concurrency_fraction: self.concurrency_fraction,
            sales: self.sales,
            stores: self.stores,
            min_products: self.min_products,
            max_products: self.max_products,
            seed: self.seed,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            init_logging(cli.log_level.as_deref(), Some(&args.log_file))?;
            run_benchmark(args).await
        }
        Commands::Env => {
            init_logging(cli.log_level.as_deref(), None)?;
            let env = log_runtime_environment();
            println!("{}", serde_json::to_string_pretty(&env)?);
            Ok(())
        }
    }
}

async fn run_benchmark(args: RunArgs) -> anyhow::Result<()> {
    let environment = log_runtime_environment();
    let config = args.bench_config();
    config.validate()?;

    let store: Arc<dyn InventoryStore> = if args.memory {
        tracing::info!("Using the in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!(
            "Connecting to MongoDB at {} (database '{}')",
            mask_connection_password(&args.mongodb_uri),
            args.database
        );
        let mongo = MongoStore::connect(&args.mongodb_uri, &args.database)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to MongoDB at {}",
                    mask_connection_password(&args.mongodb_uri)
                )
            })?;
        if args.reset {
            mongo
                .reset()
                .await
                .context("Failed to reset the inventory collections")?;
        }
        Arc::new(mongo)
    };

    let sink = SvgChartSink::new(&args.output_dir);
    let results = measure_performance(store, &config, &sink)
        .await
        .context("Benchmark failed")?;

    println!("{}", format_table(&results));

    if let Some(path) = &args.report {
        let report = BenchReport::new(&environment, &config, &results);
        write_json_report(&report, path)
            .with_context(|| format!("Failed to write JSON report to {}", path.display()))?;
    }
    if let Some(path) = &args.markdown {
        write_markdown_report(&format_markdown(&results), path)
            .with_context(|| format!("Failed to write markdown report to {}", path.display()))?;
    }

    tracing::info!("Charts written to {}", args.output_dir.display());
    Ok(())
}
