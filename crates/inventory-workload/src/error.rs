//! Error types for the workload simulator.

use inventory_store::StoreError;
use thiserror::Error;

/// A single operation failed. Contained by the scheduler: the sample is
/// dropped and the run continues.
#[derive(Error, Debug)]
pub enum OperationError {
    /// The persistence call raised.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors that abort a whole run.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Operations were requested but there is no store to target.
    #[error("Cannot schedule {0} operations without any stores")]
    EmptyStores(usize),

    /// The concurrency fraction is not a finite number.
    #[error("Invalid concurrency fraction: {0}")]
    InvalidConcurrency(f64),

    /// The worker pool could not be set up or stopped handing out slots.
    #[error("Worker pool error: {0}")]
    PoolSetup(String),
}
