use crate::{error::StoreError, schema::TableSchema};
use codec::{OffsetTimestampCodec, StoredTimestampRecord};
use model::{
    core::{
        data_type::{DataType, SqlDialect},
        timestamp::OffsetTimestamp,
        value::{FieldValue, Value},
        zone::SessionZone,
    },
    records::row::RowData,
};

pub const ENTITY_TABLE: &str = "entity_with_offset_timestamp";
pub const ID_COLUMN: &str = "id";
pub const CREATED_AT_COLUMN: &str = "created_at";

/// An entity with an integer id and a creation timestamp carrying its UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetTimestampEntity {
    pub id: i32,
    pub created_at: OffsetTimestamp,
}

impl OffsetTimestampEntity {
    pub fn new(id: i32, created_at: OffsetTimestamp) -> Self {
        Self { id, created_at }
    }

    /// Schema of the entity table with `created_at` stored as `created_at_type`.
    pub fn schema(
        dialect: SqlDialect,
        created_at_type: &str,
        session_zone: SessionZone,
    ) -> Result<TableSchema, StoreError> {
        let schema = TableSchema::resolve(
            ENTITY_TABLE,
            dialect,
            &[(ID_COLUMN, "INT"), (CREATED_AT_COLUMN, created_at_type)],
            ID_COLUMN,
            session_zone,
        )?;
        // Fail at configuration time rather than on the first write.
        schema.capability(CREATED_AT_COLUMN)?;
        Ok(schema)
    }

    pub fn key(&self) -> String {
        self.id.to_string()
    }

    pub fn to_row(
        &self,
        schema: &TableSchema,
        codec: &OffsetTimestampCodec,
    ) -> Result<RowData, StoreError> {
        let capability = schema.capability(CREATED_AT_COLUMN)?;
        let record = codec.encode(&self.created_at, &capability)?;
        let created_at = record.to_value()?;
        let created_at_type = schema
            .column(CREATED_AT_COLUMN)
            .map(|c| c.data_type.clone())
            .unwrap_or(DataType::Timestamp);

        Ok(RowData::new(
            &schema.name,
            vec![
                FieldValue::new(ID_COLUMN, Value::Int(i64::from(self.id)), DataType::Int),
                FieldValue::new(CREATED_AT_COLUMN, created_at, created_at_type),
            ],
        ))
    }

    pub fn from_row(
        row: &RowData,
        schema: &TableSchema,
        codec: &OffsetTimestampCodec,
    ) -> Result<Self, StoreError> {
        let missing = |column: &str| StoreError::MissingColumn {
            table: schema.name.clone(),
            column: column.to_string(),
        };

        let id = row
            .get_value(ID_COLUMN)
            .as_i64()
            .and_then(|id| i32::try_from(id).ok())
            .ok_or_else(|| missing(ID_COLUMN))?;

        let value = row.get_value(CREATED_AT_COLUMN);
        if value.is_null() {
            return Err(missing(CREATED_AT_COLUMN));
        }
        let capability = schema.capability(CREATED_AT_COLUMN)?;
        let record = StoredTimestampRecord::from_value(&value, &capability)?;

        Ok(Self::new(id, codec.decode(&record)?))
    }
}
