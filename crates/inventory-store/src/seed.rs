//! Initial population of stores, products and sales before a run.

use crate::documents::{product_filter, stock_increment, to_document};
use crate::error::StoreError;
use crate::store::InventoryStore;
use inventory_generator::RecordGenerator;
use inventory_model::{Collection, Store};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Metrics from a seeding step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedMetrics {
    /// Number of store documents inserted.
    pub stores_inserted: u64,
    /// Number of standalone product documents inserted.
    pub products_inserted: u64,
    /// Number of sale documents inserted.
    pub sales_inserted: u64,
    /// Number of stock decrements applied for sales.
    pub stock_updates: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl SeedMetrics {
    /// Fold another seeding step into this one.
    pub fn merge(&mut self, other: &SeedMetrics) {
        self.stores_inserted += other.stores_inserted;
        self.products_inserted += other.products_inserted;
        self.sales_inserted += other.sales_inserted;
        self.stock_updates += other.stock_updates;
        self.total_duration += other.total_duration;
    }
}

/// Generate `count` stores and insert them, along with every embedded product
/// tagged with its store into the `products` collection.
///
/// Returns the generated stores so the workload can pick targets from them.
pub async fn seed_stores<S, G>(
    store: &S,
    generator: &mut G,
    count: usize,
    min_products: usize,
    max_products: usize,
) -> Result<(Vec<Store>, SeedMetrics), StoreError>
where
    S: InventoryStore + ?Sized,
    G: RecordGenerator + ?Sized,
{
    let start_time = Instant::now();
    let mut metrics = SeedMetrics::default();

    let stores: Vec<Store> = (0..count)
        .map(|_| generator.new_store(min_products, max_products))
        .collect();

    let store_docs = stores
        .iter()
        .map(to_document)
        .collect::<Result<Vec<_>, _>>()?;
    metrics.stores_inserted = store.insert_many(Collection::Stores, store_docs).await?;

    let product_docs = stores
        .iter()
        .flat_map(Store::tagged_products)
        .map(|product| to_document(&product))
        .collect::<Result<Vec<_>, _>>()?;
    metrics.products_inserted = store
        .insert_many(Collection::Products, product_docs)
        .await?;

    metrics.total_duration = start_time.elapsed();
    info!(
        "Seeded {} stores with {} products in {:?}",
        metrics.stores_inserted, metrics.products_inserted, metrics.total_duration
    );

    Ok((stores, metrics))
}

/// Generate `count` sales against random stores and products.
///
/// Each sale decrements its product's stock exactly once, then all sales are
/// inserted in one batch. Stores without products are skipped.
pub async fn seed_sales<S, G, R>(
    store: &S,
    generator: &mut G,
    rng: &mut R,
    stores: &[Store],
    count: usize,
) -> Result<SeedMetrics, StoreError>
where
    S: InventoryStore + ?Sized,
    G: RecordGenerator + ?Sized,
    R: Rng + ?Sized,
{
    let start_time = Instant::now();
    let mut metrics = SeedMetrics::default();
    let mut sale_docs = Vec::with_capacity(count);

    for _ in 0..count {
        let Some(target) = stores.choose(rng) else {
            break;
        };
        let Some(product) = target.products.choose(rng) else {
            debug!("Store {} has no products, skipping sale", target.store_id);
            continue;
        };

        let sale = generator.new_sale(&target.store_id, &product.product_id, product.price);
        store
            .update_one(
                Collection::Products,
                product_filter(&target.store_id, &product.product_id),
                stock_increment(sale.stock_delta()),
            )
            .await?;
        metrics.stock_updates += 1;
        sale_docs.push(to_document(&sale)?);
    }

    metrics.sales_inserted = store.insert_many(Collection::Sales, sale_docs).await?;
    metrics.total_duration = start_time.elapsed();
    info!(
        "Seeded {} sales in {:?}",
        metrics.sales_inserted, metrics.total_duration
    );

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_merge() {
        let mut total = SeedMetrics {
            stores_inserted: 1,
            products_inserted: 5,
            sales_inserted: 0,
            stock_updates: 0,
            total_duration: Duration::from_millis(10),
        };
        total.merge(&SeedMetrics {
            stores_inserted: 0,
            products_inserted: 0,
            sales_inserted: 3,
            stock_updates: 3,
            total_duration: Duration::from_millis(5),
        });

        assert_eq!(total.stores_inserted, 1);
        assert_eq!(total.sales_inserted, 3);
        assert_eq!(total.total_duration, Duration::from_millis(15));
    }
}
