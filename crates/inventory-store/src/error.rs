//! Error types for the persistence layer.

use thiserror::Error;

/// Errors raised by any [`InventoryStore`](crate::InventoryStore) operation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// MongoDB connection or query error.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    /// Failed to convert a value into a BSON document.
    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    /// Failed to convert a BSON document into a value.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bson::de::Error),

    /// The backing store cannot serve requests.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Update document is not a supported increment spec.
    #[error("Invalid update: {0}")]
    InvalidUpdate(String),
}
