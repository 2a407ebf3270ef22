use crate::error::StoreError;
use async_trait::async_trait;
use model::records::row::RowData;

pub mod memory;
pub mod sled_store;

/// Keyed row storage. Rows are opaque to the store; timestamp conversion happens
/// before a row reaches it and after it leaves.
#[async_trait]
pub trait RowStore: Send + Sync {
    async fn upsert(&self, table: &str, key: &str, row: &RowData) -> Result<(), StoreError>;
    async fn fetch(&self, table: &str, key: &str) -> Result<Option<RowData>, StoreError>;
    /// Returns whether a row was removed.
    async fn delete(&self, table: &str, key: &str) -> Result<bool, StoreError>;

    /// Makes previous writes durable.
    async fn sync(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
