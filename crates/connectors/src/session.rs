use crate::{
    entity::OffsetTimestampEntity, error::StoreError, schema::TableSchema, store::RowStore,
};
use codec::OffsetTimestampCodec;
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, info};

/// A unit of work over the entity table: staged writes go out on [`Session::flush`],
/// reads always go to the store.
pub struct Session {
    store: Arc<dyn RowStore>,
    schema: TableSchema,
    codec: OffsetTimestampCodec,
    pending: BTreeMap<i32, OffsetTimestampEntity>,
}

impl Session {
    pub fn new(store: Arc<dyn RowStore>, schema: TableSchema, codec: OffsetTimestampCodec) -> Self {
        Self {
            store,
            schema,
            codec,
            pending: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Stages an entity; a later persist of the same id replaces it.
    pub fn persist(&mut self, entity: &OffsetTimestampEntity) {
        debug!("Staging {}#{}", self.schema.name, entity.id);
        self.pending.insert(entity.id, *entity);
    }

    /// Encodes every staged entity and writes the rows. If any entity fails to
    /// encode nothing is written and all entities stay staged.
    pub async fn flush(&mut self) -> Result<usize, StoreError> {
        let rows = self
            .pending
            .values()
            .map(|entity| Ok((entity.key(), entity.to_row(&self.schema, &self.codec)?)))
            .collect::<Result<Vec<_>, StoreError>>()?;

        for (key, row) in &rows {
            self.store.upsert(&self.schema.name, key, row).await?;
        }
        self.store.sync().await?;
        self.pending.clear();

        info!("Flushed {} row(s) to {}", rows.len(), self.schema.name);
        Ok(rows.len())
    }

    /// Overwrites `entity` with its stored state.
    pub async fn refresh(&self, entity: &mut OffsetTimestampEntity) -> Result<(), StoreError> {
        if self.pending.contains_key(&entity.id) {
            return Err(StoreError::UnflushedChanges(format!(
                "{}#{}",
                self.schema.name, entity.id
            )));
        }

        *entity = self.find(entity.id).await?.ok_or_else(|| StoreError::NotFound {
            table: self.schema.name.clone(),
            key: entity.key(),
        })?;
        Ok(())
    }

    pub async fn find(&self, id: i32) -> Result<Option<OffsetTimestampEntity>, StoreError> {
        let Some(row) = self.store.fetch(&self.schema.name, &id.to_string()).await? else {
            return Ok(None);
        };
        let entity = OffsetTimestampEntity::from_row(&row, &self.schema, &self.codec)?;
        debug!("Loaded {}#{}: {}", self.schema.name, id, entity.created_at);
        Ok(Some(entity))
    }

    /// Drops a staged entity and deletes its stored row.
    pub async fn remove(&mut self, id: i32) -> Result<bool, StoreError> {
        let staged = self.pending.remove(&id).is_some();
        let stored = self.store.delete(&self.schema.name, &id.to_string()).await?;
        Ok(staged || stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use chrono::{DateTime, Utc};
    use codec::{CodecError, TimestampPolicy};
    use model::core::{data_type::SqlDialect, timestamp::OffsetTimestamp, zone::SessionZone};

    fn session(column_type: &str, zone: &str, policy: TimestampPolicy) -> (Session, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let schema =
            OffsetTimestampEntity::schema(SqlDialect::MsSql, column_type, zone.parse().unwrap())
                .unwrap();
        let session = Session::new(store.clone(), schema, OffsetTimestampCodec::new(policy));
        (session, store)
    }

    fn new_york_epoch() -> OffsetTimestamp {
        OffsetTimestamp::new(DateTime::<Utc>::UNIX_EPOCH, -300)
    }

    #[tokio::test]
    async fn test_persist_flush_refresh() {
        let (mut session, store) =
            session("DATETIMEOFFSET", "Europe/Vienna", TimestampPolicy::OffsetPreserving);
        let mut entity = OffsetTimestampEntity::new(0, new_york_epoch());

        session.persist(&entity);
        assert_eq!(store.len().await, 0);
        assert_eq!(session.flush().await.unwrap(), 1);
        assert_eq!(session.pending(), 0);

        session.refresh(&mut entity).await.unwrap();
        assert_eq!(entity.created_at, new_york_epoch());
    }

    #[tokio::test]
    async fn test_refresh_with_unflushed_changes_fails() {
        let (mut session, _) =
            session("DATETIMEOFFSET", "UTC", TimestampPolicy::OffsetPreserving);
        let mut entity = OffsetTimestampEntity::new(4, new_york_epoch());
        session.persist(&entity);
        assert!(matches!(
            session.refresh(&mut entity).await,
            Err(StoreError::UnflushedChanges(_))
        ));
    }

    #[tokio::test]
    async fn test_refresh_missing_row() {
        let (session, _) = session("DATETIMEOFFSET", "UTC", TimestampPolicy::OffsetPreserving);
        let mut entity = OffsetTimestampEntity::new(9, new_york_epoch());
        assert!(matches!(
            session.refresh(&mut entity).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_failed_flush_writes_nothing() {
        let (mut session, store) = session("DATETIMEOFFSET", "UTC", TimestampPolicy::OffsetPreserving);
        session.persist(&OffsetTimestampEntity::new(1, new_york_epoch()));
        session.persist(&OffsetTimestampEntity::new(
            2,
            OffsetTimestamp::new(DateTime::<Utc>::UNIX_EPOCH, 18 * 60 + 1),
        ));

        let err = session.flush().await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Codec(CodecError::OutOfRangeOffset { minutes: 1081 })
        ));
        assert_eq!(store.len().await, 0);
        assert_eq!(session.pending(), 2);
    }

    #[tokio::test]
    async fn test_instant_preserving_on_naive_column() {
        let (mut session, _) =
            session("DATETIME2", "Europe/Vienna", TimestampPolicy::InstantPreserving);
        let mut entity = OffsetTimestampEntity::new(0, new_york_epoch());
        session.persist(&entity);
        session.flush().await.unwrap();
        session.refresh(&mut entity).await.unwrap();

        assert_eq!(entity.created_at.instant(), DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(entity.created_at.utc_offset_minutes(), 60);
    }

    #[tokio::test]
    async fn test_remove() {
        let (mut session, _) = session("DATETIMEOFFSET", "UTC", TimestampPolicy::OffsetPreserving);
        session.persist(&OffsetTimestampEntity::new(5, new_york_epoch()));
        session.flush().await.unwrap();
        assert!(session.remove(5).await.unwrap());
        assert!(session.find(5).await.unwrap().is_none());
        assert!(!session.remove(5).await.unwrap());
    }

    #[test]
    fn test_zone_is_explicit() {
        let (session, _) = session("DATETIME2", "America/New_York", TimestampPolicy::InstantPreserving);
        assert_eq!(
            session.schema().capability("created_at").unwrap().session_zone(),
            Some("America/New_York".parse::<SessionZone>().unwrap())
        );
    }
}
