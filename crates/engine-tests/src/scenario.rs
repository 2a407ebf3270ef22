use codec::{OffsetTimestampCodec, TimestampPolicy};
use connectors::{
    entity::OffsetTimestampEntity, error::StoreError, session::Session, store::RowStore,
};
use model::core::{data_type::SqlDialect, timestamp::OffsetTimestamp, zone::SessionZone};
use std::sync::Arc;
use tracing::info;

/// Column setup a scenario runs against.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSetup<'a> {
    pub dialect: SqlDialect,
    pub column_type: &'a str,
    pub session_zone: SessionZone,
    pub policy: TimestampPolicy,
}

/// `persist`, `flush`, then `refresh` a single entity and return what was read back.
pub async fn persist_flush_refresh(
    store: Arc<dyn RowStore>,
    setup: ColumnSetup<'_>,
    id: i32,
    created_at: OffsetTimestamp,
) -> Result<OffsetTimestampEntity, StoreError> {
    let schema =
        OffsetTimestampEntity::schema(setup.dialect, setup.column_type, setup.session_zone)?;
    let mut session = Session::new(store, schema, OffsetTimestampCodec::new(setup.policy));

    let mut entity = OffsetTimestampEntity::new(id, created_at);
    session.persist(&entity);
    session.flush().await?;
    session.refresh(&mut entity).await?;

    info!(
        "Stored {} in {} ({}), read back {}",
        created_at, setup.column_type, setup.policy, entity.created_at
    );
    Ok(entity)
}
