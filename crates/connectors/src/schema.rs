use crate::error::StoreError;
use model::core::{
    capability::ColumnCapability,
    data_type::{DataType, SqlDialect},
    zone::SessionZone,
};

/// A column together with the timestamp capability resolved for it at configuration time.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: DataType,
    pub capability: Option<ColumnCapability>,
}

impl ColumnDescriptor {
    pub fn new(name: &str, data_type: DataType, session_zone: SessionZone) -> Self {
        let capability = ColumnCapability::for_column(&data_type, session_zone);
        ColumnDescriptor {
            name: name.to_string(),
            data_type,
            capability,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub name: String,
    pub dialect: SqlDialect,
    pub columns: Vec<ColumnDescriptor>,
    pub primary_key: String,
}

impl TableSchema {
    /// Builds a schema from dialect type names, e.g. `("created_at", "DATETIMEOFFSET")`.
    pub fn resolve(
        name: &str,
        dialect: SqlDialect,
        columns: &[(&str, &str)],
        primary_key: &str,
        session_zone: SessionZone,
    ) -> Result<Self, StoreError> {
        let columns = columns
            .iter()
            .map(|(column, type_name)| {
                DataType::from_dialect_type(dialect, type_name)
                    .map(|data_type| ColumnDescriptor::new(column, data_type, session_zone))
                    .map_err(StoreError::InvalidSchema)
            })
            .collect::<Result<Vec<_>, _>>()?;

        if !columns.iter().any(|c| c.name == primary_key) {
            return Err(StoreError::InvalidSchema(format!(
                "primary key {primary_key} is not a column of {name}"
            )));
        }

        Ok(TableSchema {
            name: name.to_string(),
            dialect,
            columns,
            primary_key: primary_key.to_string(),
        })
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Capability of a temporal column; fails for unknown or non-temporal columns.
    pub fn capability(&self, column: &str) -> Result<ColumnCapability, StoreError> {
        self.column(column)
            .and_then(|c| c.capability)
            .ok_or_else(|| {
                StoreError::InvalidSchema(format!(
                    "column {column} of {} has no timestamp capability",
                    self.name
                ))
            })
    }

    pub fn create_table_sql(&self) -> Result<String, StoreError> {
        let mut defs = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let type_name = column.data_type.type_name(self.dialect).ok_or_else(|| {
                StoreError::InvalidSchema(format!(
                    "{} has no {} column type for {}",
                    self.dialect, column.data_type, column.name
                ))
            })?;
            let mut def = format!("{} {}", column.name, type_name);
            if column.name == self.primary_key {
                def.push_str(" PRIMARY KEY");
            }
            defs.push(def);
        }
        Ok(format!("CREATE TABLE {} ({});", self.name, defs.join(", ")))
    }
}
