use crate::{error::StoreError, store::RowStore};
use async_trait::async_trait;
use model::records::row::RowData;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<(String, String), RowData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl RowStore for MemoryStore {
    async fn upsert(&self, table: &str, key: &str, row: &RowData) -> Result<(), StoreError> {
        self.rows
            .write()
            .await
            .insert((table.to_string(), key.to_string()), row.clone());
        Ok(())
    }

    async fn fetch(&self, table: &str, key: &str) -> Result<Option<RowData>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&(table.to_string(), key.to_string())).cloned())
    }

    async fn delete(&self, table: &str, key: &str) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        Ok(rows.remove(&(table.to_string(), key.to_string())).is_some())
    }
}
