//! Persistence layer for the inventory benchmark.
//!
//! The [`InventoryStore`] trait is the capability the workload runs against.
//! Two implementations are provided:
//!
//! - [`MongoStore`] - backed by a MongoDB database through the official driver
//! - [`MemoryStore`] - an in-process document store for dry runs and tests
//!
//! The [`seed`] module fills a store with generated stores, products and sales
//! before a simulation run.

pub mod documents;
pub mod error;
pub mod memory;
pub mod mongo;
pub mod seed;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use seed::{seed_sales, seed_stores, SeedMetrics};
pub use store::InventoryStore;
