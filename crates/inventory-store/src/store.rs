//! The persistence capability.

use crate::error::StoreError;
use async_trait::async_trait;
use bson::Document;
use inventory_model::Collection;
use std::sync::Arc;

/// Document persistence used by seeding and by every simulated operation.
///
/// Implementations must make single-document inserts and increments atomic;
/// the workload issues them concurrently from many tasks.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Insert one document.
    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<(), StoreError>;

    /// Insert many documents, returning how many were inserted.
    async fn insert_many(
        &self,
        collection: Collection,
        docs: Vec<Document>,
    ) -> Result<u64, StoreError>;

    /// All documents whose top-level fields equal those in `filter`.
    async fn find(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError>;

    /// Apply an `$inc` update to the first document matching `filter`,
    /// returning the matched count (0 or 1).
    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        update: Document,
    ) -> Result<u64, StoreError>;
}

#[async_trait]
impl<T: InventoryStore + ?Sized> InventoryStore for Arc<T> {
    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<(), StoreError> {
        (**self).insert_one(collection, doc).await
    }

    async fn insert_many(
        &self,
        collection: Collection,
        docs: Vec<Document>,
    ) -> Result<u64, StoreError> {
        (**self).insert_many(collection, docs).await
    }

    async fn find(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError> {
        (**self).find(collection, filter).await
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        update: Document,
    ) -> Result<u64, StoreError> {
        (**self).update_one(collection, filter, update).await
    }
}
