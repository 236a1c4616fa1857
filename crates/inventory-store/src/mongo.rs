//! MongoDB-backed store.

use crate::error::StoreError;
use crate::store::InventoryStore;
use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use inventory_model::Collection;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::time::Duration;
use tracing::{debug, info};

/// How long the driver waits to find a usable server before failing.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Store backed by a MongoDB database.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect to MongoDB, verify the server answers, and make sure the
    /// `stores`, `products` and `sales` collections exist.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - MongoDB connection string (e.g., "mongodb://localhost:27017/")
    /// * `database_name` - Name of the database to use
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = MongoStore::connect("mongodb://localhost:27017/", "inventory_db").await?;
    /// ```
    pub async fn connect(
        connection_string: &str,
        database_name: &str,
    ) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(connection_string).await?;
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        options.connect_timeout = Some(SERVER_SELECTION_TIMEOUT);

        let client = Client::with_options(options)?;
        let database = client.database(database_name);

        // Test connection
        database.run_command(doc! { "ping": 1 }).await?;
        info!("Connected to MongoDB database '{}'", database_name);

        let store = Self::with_database(database);
        store.ensure_collections().await?;
        Ok(store)
    }

    /// Wrap an existing database handle.
    pub fn with_database(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.database.collection(collection.name())
    }

    /// Create any of the three collections that do not exist yet.
    pub async fn ensure_collections(&self) -> Result<(), StoreError> {
        let existing = self.database.list_collection_names().await?;
        for collection in Collection::ALL {
            if existing.iter().any(|name| name == collection.name()) {
                info!(
                    "Collection '{}' already exists in database '{}'",
                    collection,
                    self.database.name()
                );
            } else {
                self.database.create_collection(collection.name()).await?;
                info!(
                    "Collection '{}' created in database '{}'",
                    collection,
                    self.database.name()
                );
            }
        }
        Ok(())
    }

    /// Drop and recreate the three collections.
    pub async fn reset(&self) -> Result<(), StoreError> {
        for collection in Collection::ALL {
            info!("Dropping collection: {}", collection);
            self.collection(collection).drop().await?;
        }
        self.ensure_collections().await
    }

    /// Get the document count for a collection.
    pub async fn document_count(&self, collection: Collection) -> Result<u64, StoreError> {
        Ok(self.collection(collection).count_documents(doc! {}).await?)
    }
}

#[async_trait]
impl InventoryStore for MongoStore {
    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<(), StoreError> {
        self.collection(collection).insert_one(doc).await?;
        Ok(())
    }

    async fn insert_many(
        &self,
        collection: Collection,
        docs: Vec<Document>,
    ) -> Result<u64, StoreError> {
        if docs.is_empty() {
            return Ok(0);
        }
        let result = self.collection(collection).insert_many(docs).await?;
        debug!(
            "Inserted {} documents into '{}'",
            result.inserted_ids.len(),
            collection
        );
        Ok(result.inserted_ids.len() as u64)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(collection).find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        update: Document,
    ) -> Result<u64, StoreError> {
        let result = self.collection(collection).update_one(filter, update).await?;
        Ok(result.matched_count)
    }
}
