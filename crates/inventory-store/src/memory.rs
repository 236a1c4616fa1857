//! In-process document store.

use crate::error::StoreError;
use crate::store::InventoryStore;
use async_trait::async_trait;
use bson::{Bson, Document};
use inventory_model::Collection;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

/// Document store held in memory.
///
/// Filters are top-level equality matches and updates are `$inc` specs, the
/// subset of MongoDB the benchmark issues. Every operation takes the lock for
/// its whole duration, so single-document updates are atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
    latency: Option<Duration>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every operation by `latency` to imitate a network round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of documents in a collection.
    pub async fn document_count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }

    /// Snapshot of every document in a collection.
    pub async fn documents(&self, collection: Collection) -> Vec<Document> {
        self.collections
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Remove every document from every collection.
    pub async fn clear(&self) {
        self.collections.write().await.clear();
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

/// Whether every field in `filter` is present in `doc` with an equal value.
fn matches_filter(doc: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| doc.get(key) == Some(expected))
}

/// Apply a `$inc` update spec to `doc`.
fn apply_increment(doc: &mut Document, update: &Document) -> Result<(), StoreError> {
    if update.len() != 1 {
        return Err(StoreError::InvalidUpdate(format!(
            "expected a single $inc operator, got {update}"
        )));
    }
    let increments = update
        .get_document("$inc")
        .map_err(|_| StoreError::InvalidUpdate(format!("unsupported update: {update}")))?;

    // Validate every field before mutating so a bad spec leaves the doc untouched
    let mut results = Vec::with_capacity(increments.len());
    for (field, delta) in increments {
        let updated = add_numbers(doc.get(field), delta).ok_or_else(|| {
            StoreError::InvalidUpdate(format!("cannot apply $inc of {delta} to field '{field}'"))
        })?;
        results.push((field.clone(), updated));
    }
    for (field, value) in results {
        doc.insert(field, value);
    }
    Ok(())
}

/// Numeric addition following MongoDB's type widening; a missing field
/// takes the delta as its value.
fn add_numbers(current: Option<&Bson>, delta: &Bson) -> Option<Bson> {
    match (current, delta) {
        (None, Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_)) => Some(delta.clone()),
        (Some(Bson::Int32(a)), Bson::Int32(b)) => Some(
            a.checked_add(*b)
                .map(Bson::Int32)
                .unwrap_or_else(|| Bson::Int64(i64::from(*a) + i64::from(*b))),
        ),
        (Some(Bson::Int32(a)), Bson::Int64(b)) => i64::from(*a).checked_add(*b).map(Bson::Int64),
        (Some(Bson::Int64(a)), Bson::Int32(b)) => a.checked_add(i64::from(*b)).map(Bson::Int64),
        (Some(Bson::Int64(a)), Bson::Int64(b)) => a.checked_add(*b).map(Bson::Int64),
        (Some(Bson::Double(a)), Bson::Int32(b)) => Some(Bson::Double(a + f64::from(*b))),
        (Some(Bson::Double(a)), Bson::Int64(b)) => Some(Bson::Double(a + *b as f64)),
        (Some(Bson::Double(a)), Bson::Double(b)) => Some(Bson::Double(a + b)),
        (Some(Bson::Int32(a)), Bson::Double(b)) => Some(Bson::Double(f64::from(*a) + b)),
        (Some(Bson::Int64(a)), Bson::Double(b)) => Some(Bson::Double(*a as f64 + b)),
        _ => None,
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<(), StoreError> {
        self.simulate_latency().await;
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(doc);
        Ok(())
    }

    async fn insert_many(
        &self,
        collection: Collection,
        docs: Vec<Document>,
    ) -> Result<u64, StoreError> {
        self.simulate_latency().await;
        let inserted = docs.len() as u64;
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .extend(docs);
        Ok(inserted)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError> {
        self.simulate_latency().await;
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches_filter(doc, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        update: Document,
    ) -> Result<u64, StoreError> {
        self.simulate_latency().await;
        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| matches_filter(doc, &filter)));

        match target {
            Some(doc) => {
                apply_increment(doc, &update)?;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
