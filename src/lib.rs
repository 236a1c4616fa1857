//! inventory-bench: a synthetic-data load generator and benchmark for a
//! document-store inventory model.
//!
//! The member crates hold the pieces; this crate wires them into the
//! repeated-run driver ([`bench::measure_performance`]) and the command-line
//! bootstrap.

pub mod bench;
pub mod environment;
pub mod logging;

pub use bench::{measure_performance, BenchConfig, BenchError};
pub use environment::{log_runtime_environment, EnvironmentInfo};
pub use logging::{init_logging, mask_connection_password};
