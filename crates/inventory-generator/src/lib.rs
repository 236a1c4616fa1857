//! Fake record generator for the inventory benchmark.
//!
//! This crate provides the [`RecordGenerator`] capability and
//! [`FakeRecordGenerator`], which produces well-formed stores, products and
//! sales from a seeded RNG. The same seed yields the same record sequence.
//!
//! # Architecture
//!
//! ```text
//!        seed
//!          │
//!          ▼
//! ┌──────────────────────┐
//! │ FakeRecordGenerator  │
//! │                      │
//! │  - rng (StdRng)      │
//! │  - today             │
//! │  - generated         │
//! └──────────┬───────────┘
//!            │
//!            ▼
//!   Store { products: [Product..] } / Product / Sale
//! ```
//!
//! # Example
//!
//! ```rust
//! use inventory_generator::{FakeRecordGenerator, RecordGenerator};
//!
//! let mut generator = FakeRecordGenerator::new(42);
//! let store = generator.new_store(5, 20);
//! assert!((5..=20).contains(&store.products.len()));
//!
//! let product = &store.products[0];
//! let sale = generator.new_sale(&store.store_id, &product.product_id, product.price);
//! assert_eq!(sale.store_id, store.store_id);
//! ```

pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use generator::{FakeRecordGenerator, RecordGenerator};
