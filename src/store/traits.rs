use crate::error::StoreError;
use crate::store::types::{Document, FieldWrites, Fields, WriteMode};
use async_trait::async_trait;

/// Opaque remote document collection.
///
/// Queries always return a whole collection; filtering happens after the
/// results are materialized.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in `collection`, newest `order_by` value first
    async fn list(&self, collection: &str, order_by: &str) -> Result<Vec<Document>, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Store a new document and return the id assigned to it
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Write the given field paths, leaving every other field untouched
    async fn update(
        &self,
        collection: &str,
        id: &str,
        writes: FieldWrites,
        mode: WriteMode,
    ) -> Result<(), StoreError>;

    /// Hard delete. Deleting an absent document succeeds.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    fn backend_name(&self) -> &'static str;
}
