use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::HashMap, fmt, str::FromStr};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataType {
    Int,
    BigInt,
    VarChar,
    Text,
    /// Naive wall clock, no zone information.
    Timestamp,
    /// Instant normalized to UTC by the server.
    TimestampTz,
    /// Wall clock plus explicit offset.
    TimestampOffset,
    Custom(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlDialect {
    MySql,
    Postgres,
    MsSql,
}

lazy_static! {
    static ref MYSQL_TYPE_MAP: HashMap<&'static str, DataType> = build_mysql_type_map();
    static ref POSTGRES_TYPE_MAP: HashMap<&'static str, DataType> = build_postgres_type_map();
    static ref MSSQL_TYPE_MAP: HashMap<&'static str, DataType> = build_mssql_type_map();
}

impl DataType {
    pub fn from_mysql_type(type_name: &str) -> Result<Self, String> {
        Self::lookup(&MYSQL_TYPE_MAP, type_name)
            .ok_or_else(|| format!("Unknown MySQL column type: {type_name}"))
    }

    pub fn from_postgres_type(type_name: &str) -> Result<Self, String> {
        Self::lookup(&POSTGRES_TYPE_MAP, type_name)
            .ok_or_else(|| format!("Unknown Postgres column type: {type_name}"))
    }

    pub fn from_mssql_type(type_name: &str) -> Result<Self, String> {
        Self::lookup(&MSSQL_TYPE_MAP, type_name)
            .ok_or_else(|| format!("Unknown SQL Server column type: {type_name}"))
    }

    pub fn from_dialect_type(dialect: SqlDialect, type_name: &str) -> Result<Self, String> {
        match dialect {
            SqlDialect::MySql => Self::from_mysql_type(type_name),
            SqlDialect::Postgres => Self::from_postgres_type(type_name),
            SqlDialect::MsSql => Self::from_mssql_type(type_name),
        }
    }

    /// The dialect's name for this type, or `None` when the dialect has no such type.
    pub fn type_name(&self, dialect: SqlDialect) -> Option<Cow<'_, str>> {
        match dialect {
            SqlDialect::MySql => self.mysql_name(),
            SqlDialect::Postgres => self.postgres_name(),
            SqlDialect::MsSql => self.mssql_name(),
        }
    }

    fn mysql_name(&self) -> Option<Cow<'_, str>> {
        match self {
            DataType::Int => Some(Cow::Borrowed("INT")),
            DataType::BigInt => Some(Cow::Borrowed("BIGINT")),
            DataType::VarChar => Some(Cow::Borrowed("VARCHAR")),
            DataType::Text => Some(Cow::Borrowed("TEXT")),
            DataType::Timestamp => Some(Cow::Borrowed("DATETIME(6)")),
            DataType::TimestampTz => Some(Cow::Borrowed("TIMESTAMP(6)")),
            DataType::TimestampOffset => None,
            DataType::Custom(name) => Some(Cow::Borrowed(name)),
        }
    }

    fn postgres_name(&self) -> Option<Cow<'_, str>> {
        match self {
            DataType::Int => Some(Cow::Borrowed("INTEGER")),
            DataType::BigInt => Some(Cow::Borrowed("BIGINT")),
            DataType::VarChar => Some(Cow::Borrowed("VARCHAR")),
            DataType::Text => Some(Cow::Borrowed("TEXT")),
            DataType::Timestamp => Some(Cow::Borrowed("TIMESTAMP")),
            DataType::TimestampTz => Some(Cow::Borrowed("TIMESTAMPTZ")),
            DataType::TimestampOffset => None,
            DataType::Custom(name) => Some(Cow::Borrowed(name)),
        }
    }

    fn mssql_name(&self) -> Option<Cow<'_, str>> {
        match self {
            DataType::Int => Some(Cow::Borrowed("INT")),
            DataType::BigInt => Some(Cow::Borrowed("BIGINT")),
            DataType::VarChar => Some(Cow::Borrowed("NVARCHAR")),
            DataType::Text => Some(Cow::Borrowed("NVARCHAR(MAX)")),
            DataType::Timestamp => Some(Cow::Borrowed("DATETIME2")),
            DataType::TimestampTz => None,
            DataType::TimestampOffset => Some(Cow::Borrowed("DATETIMEOFFSET")),
            DataType::Custom(name) => Some(Cow::Borrowed(name)),
        }
    }

    fn lookup(map: &HashMap<&'static str, DataType>, type_name: &str) -> Option<Self> {
        let normalized = Self::normalize_type_name(type_name);
        map.get(normalized.as_str()).cloned()
    }

    /// Upper-cases and strips a precision suffix: `datetime2(7)` becomes `DATETIME2`.
    fn normalize_type_name(type_name: &str) -> String {
        let trimmed = type_name.trim();
        let base = match (trimmed.find('('), trimmed.rfind(')')) {
            (Some(open), Some(close)) if open < close => {
                format!("{}{}", &trimmed[..open], &trimmed[close + 1..])
            }
            _ => trimmed.to_string(),
        };
        base.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase()
    }
}

impl FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(SqlDialect::MySql),
            "pg" | "postgres" | "postgresql" => Ok(SqlDialect::Postgres),
            "mssql" | "sqlserver" | "sql-server" => Ok(SqlDialect::MsSql),
            other => Err(format!("Unknown SQL dialect: {other}")),
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlDialect::MySql => write!(f, "mysql"),
            SqlDialect::Postgres => write!(f, "postgres"),
            SqlDialect::MsSql => write!(f, "mssql"),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Custom(name) => write!(f, "{name}"),
            other => write!(f, "{other:?}"),
        }
    }
}

fn build_mysql_type_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("INT", Int),
        ("INTEGER", Int),
        ("MEDIUMINT", Int),
        ("SMALLINT", Int),
        ("BIGINT", BigInt),
        ("VARCHAR", VarChar),
        ("CHAR", VarChar),
        ("TEXT", Text),
        ("LONGTEXT", Text),
        ("DATETIME", Timestamp),
        ("TIMESTAMP", TimestampTz),
    ];

    entries.into_iter().collect()
}

fn build_postgres_type_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("INTEGER", Int),
        ("INT", Int),
        ("INT4", Int),
        ("SMALLINT", Int),
        ("INT2", Int),
        ("BIGINT", BigInt),
        ("INT8", BigInt),
        ("VARCHAR", VarChar),
        ("CHARACTER VARYING", VarChar),
        ("TEXT", Text),
        ("TIMESTAMP", Timestamp),
        ("TIMESTAMP WITHOUT TIME ZONE", Timestamp),
        ("TIMESTAMPTZ", TimestampTz),
        ("TIMESTAMP WITH TIME ZONE", TimestampTz),
    ];

    entries.into_iter().collect()
}

fn build_mssql_type_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("INT", Int),
        ("SMALLINT", Int),
        ("BIGINT", BigInt),
        ("VARCHAR", VarChar),
        ("NVARCHAR", VarChar),
        ("TEXT", Text),
        ("NTEXT", Text),
        ("DATETIME", Timestamp),
        ("DATETIME2", Timestamp),
        ("SMALLDATETIME", Timestamp),
        ("DATETIMEOFFSET", TimestampOffset),
    ];

    entries.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_precision_and_case() {
        assert_eq!(
            DataType::from_mssql_type("datetimeoffset(7)").unwrap(),
            DataType::TimestampOffset
        );
        assert_eq!(
            DataType::from_postgres_type("timestamp(6)  with time zone").unwrap(),
            DataType::TimestampTz
        );
        assert_eq!(
            DataType::from_mysql_type("datetime(3)").unwrap(),
            DataType::Timestamp
        );
    }

    #[test]
    fn test_same_name_differs_per_dialect() {
        assert_eq!(
            DataType::from_mysql_type("TIMESTAMP").unwrap(),
            DataType::TimestampTz
        );
        assert_eq!(
            DataType::from_postgres_type("TIMESTAMP").unwrap(),
            DataType::Timestamp
        );
        assert!(DataType::from_postgres_type("DATETIMEOFFSET").is_err());
    }

    #[test]
    fn test_type_name_missing_in_dialect() {
        assert_eq!(
            DataType::TimestampOffset
                .type_name(SqlDialect::MsSql)
                .as_deref(),
            Some("DATETIMEOFFSET")
        );
        assert!(DataType::TimestampOffset
            .type_name(SqlDialect::Postgres)
            .is_none());
        assert!(DataType::TimestampTz.type_name(SqlDialect::MsSql).is_none());
    }

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("pg".parse::<SqlDialect>().unwrap(), SqlDialect::Postgres);
        assert_eq!("MSSQL".parse::<SqlDialect>().unwrap(), SqlDialect::MsSql);
        assert!("oracle".parse::<SqlDialect>().is_err());
    }
}
