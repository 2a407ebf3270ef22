use crate::{
    commands::ColumnArgs,
    error::CliError,
    output::{EncodeReport, RoundTripReport},
    settings::CodecSettings,
};
use codec::OffsetTimestampCodec;
use connectors::{
    entity::{CREATED_AT_COLUMN, OffsetTimestampEntity},
    schema::TableSchema,
    session::Session,
    sql::encoder_for,
    store::sled_store::SledStore,
};
use model::core::timestamp::OffsetTimestamp;
use std::{path::Path, sync::Arc};
use tracing::info;

struct Resolved {
    settings: CodecSettings,
    schema: TableSchema,
    value: OffsetTimestamp,
}

fn resolve(settings: &CodecSettings, args: &ColumnArgs) -> Result<Resolved, CliError> {
    let settings = settings.with_overrides(
        args.policy.as_deref(),
        args.session_zone.as_deref(),
        args.dialect.as_deref(),
    )?;
    let schema =
        OffsetTimestampEntity::schema(settings.dialect, &args.column_type, settings.session_zone)?;
    let value = OffsetTimestamp::parse_rfc3339(&args.value)?;
    Ok(Resolved {
        settings,
        schema,
        value,
    })
}

pub fn encode(settings: &CodecSettings, args: &ColumnArgs) -> Result<EncodeReport, CliError> {
    let Resolved {
        settings,
        schema,
        value,
    } = resolve(settings, args)?;
    let capability = schema.capability(CREATED_AT_COLUMN)?;
    let record = OffsetTimestampCodec::new(settings.policy).encode(&value, &capability)?;
    let column_value = record.to_value()?;

    Ok(EncodeReport {
        input: value.to_string(),
        capability,
        policy: settings.policy,
        record,
        sql_literal: column_value.to_string(),
        copy_text: encoder_for(settings.dialect).encode_value(&column_value),
    })
}

pub fn round_trip(settings: &CodecSettings, args: &ColumnArgs) -> Result<RoundTripReport, CliError> {
    let Resolved {
        settings,
        schema,
        value,
    } = resolve(settings, args)?;
    let capability = schema.capability(CREATED_AT_COLUMN)?;
    let decoded = OffsetTimestampCodec::new(settings.policy).round_trip(&value, &capability)?;
    Ok(RoundTripReport::new(
        &value,
        &decoded,
        capability,
        settings.policy,
    ))
}

pub async fn persist(
    settings: &CodecSettings,
    args: &ColumnArgs,
    store: &Path,
    id: i32,
) -> Result<RoundTripReport, CliError> {
    let Resolved {
        settings,
        schema,
        value,
    } = resolve(settings, args)?;
    let capability = schema.capability(CREATED_AT_COLUMN)?;
    let store = Arc::new(SledStore::open(store)?);
    let mut session = Session::new(store, schema, OffsetTimestampCodec::new(settings.policy));

    let mut entity = OffsetTimestampEntity::new(id, value);
    session.persist(&entity);
    session.flush().await?;
    session.refresh(&mut entity).await?;
    info!("Reloaded entity {} as {}", id, entity.created_at);

    Ok(RoundTripReport::new(
        &value,
        &entity.created_at,
        capability,
        settings.policy,
    ))
}

pub fn ddl(
    settings: &CodecSettings,
    column_type: &str,
    dialect: Option<&str>,
) -> Result<String, CliError> {
    let settings = settings.with_overrides(None, None, dialect)?;
    let schema =
        OffsetTimestampEntity::schema(settings.dialect, column_type, settings.session_zone)?;
    Ok(schema.create_table_sql()?)
}
