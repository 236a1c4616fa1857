//! Core entity types for the inventory benchmark.
//!
//! This crate provides the values that flow between the record generator,
//! the persistence layer and the workload scheduler:
//!
//! - [`Store`] - A store with an embedded list of products
//! - [`Product`] - A product with a mutable `stock_quantity`
//! - [`Sale`] - An immutable sale referencing a store and a product
//! - [`Collection`] - The three document collections
//! - [`OperationKind`] - The four kinds of simulated database work
//!
//! # Architecture
//!
//! ```text
//! inventory-model (this crate)
//!    │
//!    ├─── inventory-generator  (produces Store / Product / Sale values)
//!    ├─── inventory-store      (persists them as BSON documents)
//!    └─── inventory-workload   (picks targets from Store snapshots)
//! ```

pub mod collection;
pub mod entities;
pub mod operation;

pub use collection::Collection;
pub use entities::{Product, Sale, Store, PAYMENT_METHODS};
pub use operation::OperationKind;
