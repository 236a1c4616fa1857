//! Concurrent workload simulator for the inventory benchmark.
//!
//! A run picks `operation_count` operations at random against a snapshot of
//! known stores, executes them on a bounded pool of tasks against an
//! [`InventoryStore`](inventory_store::InventoryStore), and folds the timings
//! into [`RunStatistics`]. Repeated runs accumulate in [`CrossRunStatistics`].
//!
//! # Architecture
//!
//! ```text
//!   stores snapshot ──► select ──► Vec<Operation>
//!                                      │ spawn (one task each)
//!                                      ▼
//!                     ┌──────────────────────────────┐
//!                     │ JoinSet + Semaphore(budget)  │
//!                     └──────────────┬───────────────┘
//!                                    │ join_next (completion order)
//!                                    ▼
//!                             RunStatistics ──► ChartSink
//!                                    │
//!                                    ▼ fold
//!                           CrossRunStatistics
//! ```

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod scheduler;
pub mod sink;
pub mod stats;

pub use aggregate::{AggregateSummary, CrossRunStatistics};
pub use catalog::{shared_generator, Operation, OperationContext, OperationOutput, SharedGenerator};
pub use error::{OperationError, SchedulerError};
pub use scheduler::{plan_operations, select_operation, worker_budget, WorkloadScheduler};
pub use sink::{render_blocking, ChartError, ChartSink, NoopChartSink};
pub use stats::{mean, OperationCounts, RunStatistics, TimingSample};
