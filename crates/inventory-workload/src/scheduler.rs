//! Fan-out of a random operation mix over a bounded worker pool.

use crate::catalog::{Operation, OperationContext, OperationOutput};
use crate::error::{OperationError, SchedulerError};
use crate::sink::{render_blocking, ChartSink};
use crate::stats::{RunStatistics, TimingSample};
use indicatif::ProgressBar;
use inventory_model::{OperationKind, Store};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Number of concurrent workers for a run: `floor(available * fraction)`,
/// never less than one.
pub fn worker_budget(available_parallelism: usize, concurrency_fraction: f64) -> usize {
    let raw = (available_parallelism as f64 * concurrency_fraction).floor();
    if raw.is_finite() && raw >= 1.0 {
        raw as usize
    } else {
        1
    }
}

/// Pick one operation uniformly at random against `stores`.
///
/// The product for `WriteInventory` is picked from the in-memory snapshot,
/// which may be stale; it is only used to name a target. A store without
/// products is read instead.
pub fn select_operation<R: Rng + ?Sized>(rng: &mut R, stores: &[Store]) -> Option<Operation> {
    let store = stores.choose(rng)?;
    let kind = *OperationKind::ALL.choose(rng)?;

    let operation = match kind {
        OperationKind::ReadStock => Operation::ReadStock {
            store_id: store.store_id.clone(),
        },
        OperationKind::WriteInventory => match store.products.choose(rng) {
            Some(product) => Operation::WriteInventory {
                store_id: store.store_id.clone(),
                product_id: product.product_id.clone(),
                delta: rng.gen_range(1..=10),
            },
            None => Operation::ReadStock {
                store_id: store.store_id.clone(),
            },
        },
        OperationKind::AddStore => Operation::AddStore,
        OperationKind::AddProduct => Operation::AddProduct {
            store_id: store.store_id.clone(),
        },
    };
    Some(operation)
}

/// Select `count` independent operations.
pub fn plan_operations<R: Rng + ?Sized>(
    rng: &mut R,
    stores: &[Store],
    count: usize,
) -> Result<Vec<Operation>, SchedulerError> {
    if count > 0 && stores.is_empty() {
        return Err(SchedulerError::EmptyStores(count));
    }
    Ok((0..count)
        .filter_map(|_| select_operation(rng, stores))
        .collect())
}

/// Result of one worker task. The kind is attached at submission time.
enum TaskOutcome {
    Finished(OperationKind, Result<OperationOutput, OperationError>),
    PoolClosed(OperationKind),
}

/// Runs one simulation at a time against a shared store.
///
/// Each run gets a fresh pool: a `JoinSet` holding one task per operation and
/// a `Semaphore` with one permit per worker. Both are dropped when the run's
/// operations have drained.
pub struct WorkloadScheduler {
    context: OperationContext,
    rng: StdRng,
    available_parallelism: usize,
    progress: Option<ProgressBar>,
}

impl WorkloadScheduler {
    /// Create a scheduler seeded from OS entropy, sized from the CPU count.
    pub fn new(context: OperationContext) -> Self {
        Self {
            context,
            rng: StdRng::from_entropy(),
            available_parallelism: num_cpus::get(),
            progress: None,
        }
    }

    /// Use a deterministic RNG for operation selection.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Override the parallelism the worker budget is computed from.
    pub fn with_available_parallelism(mut self, available_parallelism: usize) -> Self {
        self.available_parallelism = available_parallelism;
        self
    }

    /// Advance `bar` as operations drain. The bar is reset at the start of
    /// every run.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    pub fn available_parallelism(&self) -> usize {
        self.available_parallelism
    }

    /// Run `operation_count` random operations against `stores`.
    ///
    /// Per-operation failures are logged and dropped; only a pool failure
    /// aborts the run. The finished statistics are rendered through `sink`
    /// before being returned.
    pub async fn run(
        &mut self,
        operation_count: usize,
        stores: &[Store],
        concurrency_fraction: f64,
        run_index: usize,
        sink: &dyn ChartSink,
    ) -> Result<RunStatistics, SchedulerError> {
        let run_number = run_index + 1;
        if !concurrency_fraction.is_finite() {
            return Err(SchedulerError::InvalidConcurrency(concurrency_fraction));
        }
        let budget = worker_budget(self.available_parallelism, concurrency_fraction);
        if budget > Semaphore::MAX_PERMITS {
            return Err(SchedulerError::PoolSetup(format!(
                "worker budget {budget} exceeds the maximum of {}",
                Semaphore::MAX_PERMITS
            )));
        }

        let operations = plan_operations(&mut self.rng, stores, operation_count)?;
        info!(
            "Run {}: dispatching {} operations on {} workers (concurrency fraction {})",
            run_number,
            operations.len(),
            budget,
            concurrency_fraction
        );

        let permits = Arc::new(Semaphore::new(budget));
        let mut tasks = JoinSet::new();
        for operation in operations {
            let kind = operation.kind();
            let context = self.context.clone();
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return TaskOutcome::PoolClosed(kind);
                };
                TaskOutcome::Finished(kind, context.execute(operation).await)
            });
        }

        let submitted = tasks.len();
        let progress_step = (submitted / 10).max(1);
        let mut stats = RunStatistics::new(run_index);
        let mut drained = 0usize;
        let mut failed = 0usize;
        if let Some(bar) = &self.progress {
            bar.reset();
            bar.set_length(submitted as u64);
            bar.set_message(format!("run {run_number}"));
        }

        while let Some(joined) = tasks.join_next().await {
            drained += 1;
            if let Some(bar) = &self.progress {
                bar.inc(1);
            }
            match joined {
                Ok(TaskOutcome::Finished(kind, Ok(output))) => stats.record(TimingSample {
                    kind,
                    duration_ms: output.duration_ms(),
                }),
                Ok(TaskOutcome::Finished(kind, Err(e))) => {
                    failed += 1;
                    error!("Run {}: {} failed: {}", run_number, kind, e);
                }
                Ok(TaskOutcome::PoolClosed(kind)) => {
                    tasks.abort_all();
                    return Err(SchedulerError::PoolSetup(format!(
                        "worker pool closed before {kind} could run"
                    )));
                }
                Err(e) => {
                    failed += 1;
                    error!("Run {}: worker task failed: {}", run_number, e);
                }
            }

            if drained % progress_step == 0 || drained == submitted {
                debug!(
                    "Run {}: {}/{} operations complete",
                    run_number, drained, submitted
                );
            }
        }

        if failed > 0 {
            warn!(
                "Run {}: {} of {} operations failed and were excluded",
                run_number, failed, submitted
            );
        }

        if let Some(bar) = &self.progress {
            bar.finish();
        }

        render_run_chart(sink, &stats, run_number);
        Ok(stats)
    }
}

fn render_run_chart(sink: &dyn ChartSink, stats: &RunStatistics, run_number: usize) {
    let entries = stats.counts.entries();
    let labels: Vec<&str> = entries.iter().map(|(name, _)| *name).collect();
    let values: Vec<f64> = entries.iter().map(|(_, count)| *count as f64).collect();
    let destination = PathBuf::from(format!("run_{run_number}_operations.svg"));

    if let Err(e) = render_blocking(
        sink,
        &format!("Operations for Run {run_number}"),
        &labels,
        &values,
        &destination,
    ) {
        warn!(
            "Failed to render chart {}: {}",
            destination.display(),
            e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_generator::{FakeRecordGenerator, RecordGenerator};

    fn stores(count: usize, products: usize) -> Vec<Store> {
        let mut generator = FakeRecordGenerator::new(42);
        (0..count)
            .map(|_| generator.new_store(products, products))
            .collect()
    }

    #[test]
    fn test_worker_budget() {
        assert_eq!(worker_budget(8, 0.5), 4);
        assert_eq!(worker_budget(8, 1.0), 8);
        assert_eq!(worker_budget(3, 0.5), 1);
        assert_eq!(worker_budget(7, 0.5), 3);
    }

    #[test]
    fn test_worker_budget_clamps_to_one() {
        assert_eq!(worker_budget(8, 0.0), 1);
        assert_eq!(worker_budget(8, 0.01), 1);
        assert_eq!(worker_budget(0, 1.0), 1);
        assert_eq!(worker_budget(8, -1.0), 1);
        assert_eq!(worker_budget(8, f64::NAN), 1);
    }

    #[test]
    fn test_plan_is_deterministic_for_a_seed() {
        let stores = stores(3, 4);
        let plan1 = plan_operations(&mut StdRng::seed_from_u64(9), &stores, 50).unwrap();
        let plan2 = plan_operations(&mut StdRng::seed_from_u64(9), &stores, 50).unwrap();

        assert_eq!(plan1.len(), 50);
        assert_eq!(plan1, plan2);
    }

    #[test]
    fn test_plan_targets_known_stores_and_products() {
        let stores = stores(3, 4);
        let plan = plan_operations(&mut StdRng::seed_from_u64(1), &stores, 200).unwrap();

        for operation in &plan {
            match operation {
                Operation::ReadStock { store_id } | Operation::AddProduct { store_id } => {
                    assert!(stores.iter().any(|s| &s.store_id == store_id));
                }
                Operation::WriteInventory {
                    store_id,
                    product_id,
                    delta,
                } => {
                    let store = stores.iter().find(|s| &s.store_id == store_id).unwrap();
                    assert!(store.products.iter().any(|p| &p.product_id == product_id));
                    assert!((1..=10).contains(delta));
                }
                Operation::AddStore => {}
            }
        }

        for kind in OperationKind::ALL {
            assert!(plan.iter().any(|op| op.kind() == kind), "{kind} never selected");
        }
    }

    #[test]
    fn test_store_without_products_is_read() {
        let stores = stores(1, 0);
        let plan = plan_operations(&mut StdRng::seed_from_u64(3), &stores, 100).unwrap();

        assert_eq!(plan.len(), 100);
        assert!(plan
            .iter()
            .all(|op| op.kind() != OperationKind::WriteInventory));
    }

    #[test]
    fn test_plan_without_stores() {
        let mut rng = StdRng::seed_from_u64(0);

        assert!(plan_operations(&mut rng, &[], 0).unwrap().is_empty());
        assert!(matches!(
            plan_operations(&mut rng, &[], 5),
            Err(SchedulerError::EmptyStores(5))
        ));
    }
}
