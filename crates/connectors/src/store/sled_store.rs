use crate::{error::StoreError, store::RowStore};
use async_trait::async_trait;
use model::records::row::RowData;
use std::path::Path;

/// Row store on an embedded sled database; one tree per table, rows encoded with bincode.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    fn tree(&self, table: &str) -> Result<sled::Tree, StoreError> {
        Ok(self.db.open_tree(table)?)
    }
}

#[async_trait]
impl RowStore for SledStore {
    async fn upsert(&self, table: &str, key: &str, row: &RowData) -> Result<(), StoreError> {
        let bytes = bincode::serialize(row)?;
        self.tree(table)?.insert(key, bytes)?;
        Ok(())
    }

    async fn fetch(&self, table: &str, key: &str) -> Result<Option<RowData>, StoreError> {
        match self.tree(table)?.get(key)? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, table: &str, key: &str) -> Result<bool, StoreError> {
        Ok(self.tree(table)?.remove(key)?.is_some())
    }

    async fn sync(&self) -> Result<(), StoreError> {
        self.db.flush_async().await?;
        Ok(())
    }
}
