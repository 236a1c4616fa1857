//! Seeding against the in-memory store.

use inventory_generator::FakeRecordGenerator;
use inventory_model::{Collection, Product, Sale};
use inventory_store::documents::from_document;
use inventory_store::{seed_sales, seed_stores, MemoryStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

#[tokio::test]
async fn test_seed_stores_inserts_stores_and_tagged_products() {
    let store = MemoryStore::new();
    let mut generator = FakeRecordGenerator::new(42);

    let (stores, metrics) = seed_stores(&store, &mut generator, 5, 5, 20).await.unwrap();

    assert_eq!(stores.len(), 5);
    assert_eq!(metrics.stores_inserted, 5);
    assert_eq!(store.document_count(Collection::Stores).await, 5);

    let expected_products: usize = stores.iter().map(|s| s.products.len()).sum();
    assert_eq!(metrics.products_inserted as usize, expected_products);
    assert_eq!(
        store.document_count(Collection::Products).await,
        expected_products
    );

    for doc in store.documents(Collection::Products).await {
        let product: Product = from_document(doc).unwrap();
        let owner = product.store_id.expect("seeded products carry a store id");
        assert!(stores.iter().any(|s| s.store_id == owner));
    }
}

#[tokio::test]
async fn test_seed_sales_decrements_stock_once_per_sale() {
    let store = MemoryStore::new();
    let mut generator = FakeRecordGenerator::new(7);
    let mut rng = StdRng::seed_from_u64(7);

    let (stores, _) = seed_stores(&store, &mut generator, 3, 2, 4).await.unwrap();
    let initial: HashMap<String, i64> = stores
        .iter()
        .flat_map(|s| s.products.iter())
        .map(|p| (p.product_id.clone(), p.stock_quantity))
        .collect();

    let metrics = seed_sales(&store, &mut generator, &mut rng, &stores, 50)
        .await
        .unwrap();
    assert_eq!(metrics.sales_inserted, 50);
    assert_eq!(metrics.stock_updates, 50);

    let mut sold: HashMap<String, i64> = HashMap::new();
    for doc in store.documents(Collection::Sales).await {
        let sale: Sale = from_document(doc).unwrap();
        *sold.entry(sale.product_id.clone()).or_default() += i64::from(sale.quantity_sold);
    }

    for doc in store.documents(Collection::Products).await {
        let product: Product = from_document(doc).unwrap();
        let expected = initial[&product.product_id] - sold.get(&product.product_id).copied().unwrap_or(0);
        assert_eq!(product.stock_quantity, expected);
    }
}

#[tokio::test]
async fn test_seed_sales_without_stores_inserts_nothing() {
    let store = MemoryStore::new();
    let mut generator = FakeRecordGenerator::new(1);
    let mut rng = StdRng::seed_from_u64(1);

    let metrics = seed_sales(&store, &mut generator, &mut rng, &[], 10)
        .await
        .unwrap();

    assert_eq!(metrics.sales_inserted, 0);
    assert_eq!(store.document_count(Collection::Sales).await, 0);
}
