//! Conversions between entities and BSON documents, plus the filters and
//! updates the workload issues.

use crate::error::StoreError;
use bson::{doc, Document};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Convert an entity into a BSON document.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    Ok(bson::to_document(value)?)
}

/// Convert a BSON document back into an entity.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, StoreError> {
    Ok(bson::from_document(doc)?)
}

/// Filter selecting every product of a store.
pub fn store_products_filter(store_id: &str) -> Document {
    doc! { "store_id": store_id }
}

/// Filter selecting one product of one store.
pub fn product_filter(store_id: &str, product_id: &str) -> Document {
    doc! { "product_id": product_id, "store_id": store_id }
}

/// Atomic `stock_quantity += delta` update.
pub fn stock_increment(delta: i64) -> Document {
    doc! { "$inc": { "stock_quantity": delta } }
}
