//! The four operation kinds and how each one is executed and timed.

use crate::error::OperationError;
use bson::Document;
use inventory_generator::RecordGenerator;
use inventory_model::{Collection, OperationKind};
use inventory_store::documents::{product_filter, stock_increment, store_products_filter, to_document};
use inventory_store::InventoryStore;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Record generator shared by every worker of a run.
pub type SharedGenerator = Arc<Mutex<Box<dyn RecordGenerator>>>;

/// Wrap a generator for sharing between workers.
pub fn shared_generator<G: RecordGenerator + 'static>(generator: G) -> SharedGenerator {
    let boxed: Box<dyn RecordGenerator> = Box::new(generator);
    Arc::new(Mutex::new(boxed))
}

/// One unit of simulated database work, consumed exactly once by a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// List every product of a store.
    ReadStock { store_id: String },
    /// Atomically add `delta` to one product's stock.
    WriteInventory {
        store_id: String,
        product_id: String,
        delta: i64,
    },
    /// Insert a freshly generated store with its embedded products.
    AddStore,
    /// Insert a freshly generated product for a store.
    AddProduct { store_id: String },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::ReadStock { .. } => OperationKind::ReadStock,
            Operation::WriteInventory { .. } => OperationKind::WriteInventory,
            Operation::AddStore => OperationKind::AddStore,
            Operation::AddProduct { .. } => OperationKind::AddProduct,
        }
    }
}

/// What a completed operation yields.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutput {
    /// Matched products and the elapsed time.
    Read {
        products: Vec<Document>,
        duration_ms: f64,
    },
    /// Elapsed time of a write.
    Write { duration_ms: f64 },
}

impl OperationOutput {
    pub fn duration_ms(&self) -> f64 {
        match self {
            OperationOutput::Read { duration_ms, .. } | OperationOutput::Write { duration_ms } => {
                *duration_ms
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Find all products of `store_id`.
pub async fn query_stock(
    store: &dyn InventoryStore,
    store_id: &str,
) -> Result<(Vec<Document>, f64), OperationError> {
    let start = Instant::now();
    let products = store
        .find(Collection::Products, store_products_filter(store_id))
        .await?;
    Ok((products, elapsed_ms(start)))
}

/// Atomic `stock_quantity += delta` on one product of one store.
pub async fn update_inventory(
    store: &dyn InventoryStore,
    store_id: &str,
    product_id: &str,
    delta: i64,
) -> Result<f64, OperationError> {
    let start = Instant::now();
    store
        .update_one(
            Collection::Products,
            product_filter(store_id, product_id),
            stock_increment(delta),
        )
        .await?;
    Ok(elapsed_ms(start))
}

/// Insert one freshly generated store.
///
/// Generation and serialization happen before the clock starts.
pub async fn add_store(
    store: &dyn InventoryStore,
    generator: &SharedGenerator,
    min_products: usize,
    max_products: usize,
) -> Result<f64, OperationError> {
    let new_store = generator.lock().await.new_store(min_products, max_products);
    let doc = to_document(&new_store)?;

    let start = Instant::now();
    store.insert_one(Collection::Stores, doc).await?;
    Ok(elapsed_ms(start))
}

/// Insert one freshly generated product tagged with `store_id`.
pub async fn add_product(
    store: &dyn InventoryStore,
    generator: &SharedGenerator,
    store_id: &str,
) -> Result<f64, OperationError> {
    let product = generator.lock().await.new_product().with_store_id(store_id);
    let doc = to_document(&product)?;

    let start = Instant::now();
    store.insert_one(Collection::Products, doc).await?;
    Ok(elapsed_ms(start))
}

/// Everything a worker needs to execute any operation.
#[derive(Clone)]
pub struct OperationContext {
    pub store: Arc<dyn InventoryStore>,
    pub generator: SharedGenerator,
    /// Product count bounds for stores created by `AddStore`.
    pub new_store_products: (usize, usize),
}

impl OperationContext {
    pub fn new(store: Arc<dyn InventoryStore>, generator: SharedGenerator) -> Self {
        Self {
            store,
            generator,
            new_store_products: (5, 20),
        }
    }

    /// Set the product count bounds used by `AddStore`.
    pub fn with_new_store_products(mut self, min: usize, max: usize) -> Self {
        self.new_store_products = (min, max);
        self
    }

    /// Execute one operation. Errors are returned, never retried.
    pub async fn execute(&self, operation: Operation) -> Result<OperationOutput, OperationError> {
        let store = self.store.as_ref();
        match operation {
            Operation::ReadStock { store_id } => {
                let (products, duration_ms) = query_stock(store, &store_id).await?;
                Ok(OperationOutput::Read {
                    products,
                    duration_ms,
                })
            }
            Operation::WriteInventory {
                store_id,
                product_id,
                delta,
            } => {
                let duration_ms = update_inventory(store, &store_id, &product_id, delta).await?;
                Ok(OperationOutput::Write { duration_ms })
            }
            Operation::AddStore => {
                let (min, max) = self.new_store_products;
                let duration_ms = add_store(store, &self.generator, min, max).await?;
                Ok(OperationOutput::Write { duration_ms })
            }
            Operation::AddProduct { store_id } => {
                let duration_ms = add_product(store, &self.generator, &store_id).await?;
                Ok(OperationOutput::Write { duration_ms })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use inventory_generator::FakeRecordGenerator;
    use inventory_store::MemoryStore;

    fn context(store: Arc<MemoryStore>) -> OperationContext {
        OperationContext::new(store, shared_generator(FakeRecordGenerator::new(42))).with_new_store_products(1, 2)
    }

    #[tokio::test]
    async fn test_read_stock_returns_matching_products() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_many(
                Collection::Products,
                vec![
                    doc! { "product_id": "p1", "store_id": "s1" },
                    doc! { "product_id": "p2", "store_id": "s2" },
                ],
            )
            .await
            .unwrap();

        let output = context(Arc::clone(&store))
            .execute(Operation::ReadStock {
                store_id: "s1".to_string(),
            })
            .await
            .unwrap();

        match output {
            OperationOutput::Read {
                products,
                duration_ms,
            } => {
                assert_eq!(products.len(), 1);
                assert!(duration_ms >= 0.0);
            }
            other => panic!("Expected read output, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_write_inventory_increments_stock() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_one(
                Collection::Products,
                doc! { "product_id": "p1", "store_id": "s1", "stock_quantity": 5_i64 },
            )
            .await
            .unwrap();

        let output = context(Arc::clone(&store))
            .execute(Operation::WriteInventory {
                store_id: "s1".to_string(),
                product_id: "p1".to_string(),
                delta: 7,
            })
            .await
            .unwrap();
        assert!(matches!(output, OperationOutput::Write { .. }));

        let docs = store.documents(Collection::Products).await;
        assert_eq!(docs[0].get_i64("stock_quantity").unwrap(), 12);
    }

    #[tokio::test]
    async fn test_add_store_and_add_product_insert_documents() {
        let store = Arc::new(MemoryStore::new());
        let ctx = context(Arc::clone(&store));

        ctx.execute(Operation::AddStore).await.unwrap();
        ctx.execute(Operation::AddProduct {
            store_id: "s9".to_string(),
        })
        .await
        .unwrap();

        assert_eq!(store.document_count(Collection::Stores).await, 1);
        let products = store.documents(Collection::Products).await;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].get_str("store_id").unwrap(), "s9");
    }

    #[test]
    fn test_operation_kinds() {
        assert_eq!(Operation::AddStore.kind(), OperationKind::AddStore);
        assert_eq!(
            Operation::ReadStock {
                store_id: "s".into()
            }
            .kind(),
            OperationKind::ReadStock
        );
    }
}
