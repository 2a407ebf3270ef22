use crate::core::data_type::DataType;
use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    String(String),
    /// Contents of a naive timestamp column.
    Timestamp(NaiveDateTime),
    /// Contents of a UTC-normalized column.
    TimestampTz(DateTime<Utc>),
    /// Contents of an offset-carrying column.
    TimestampOffset(DateTime<FixedOffset>),
    Null,
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::String(v) => v.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::Int(v) => Some(v.to_string()),
            Value::String(v) => Some(v.clone()),
            Value::Timestamp(v) => Some(v.to_string()),
            Value::TimestampTz(v) => Some(v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::TimestampOffset(v) => Some(v.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
            Value::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Int(_) => Some(DataType::BigInt),
            Value::String(_) => Some(DataType::Text),
            Value::Timestamp(_) => Some(DataType::Timestamp),
            Value::TimestampTz(_) => Some(DataType::TimestampTz),
            Value::TimestampOffset(_) => Some(DataType::TimestampOffset),
            Value::Null => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Option<Value>,
    pub data_type: DataType,
}

impl FieldValue {
    pub fn new(name: &str, value: Value, data_type: DataType) -> Self {
        FieldValue {
            name: name.to_string(),
            value: if value.is_null() { None } else { Some(value) },
            data_type,
        }
    }
}

/// Renders the value as a SQL literal.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Timestamp(v) => write!(f, "'{}'", v.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::TimestampTz(v) => write!(f, "'{}'", v.format("%Y-%m-%d %H:%M:%S%.f%:z")),
            Value::TimestampOffset(v) => write!(f, "'{}'", v.format("%Y-%m-%d %H:%M:%S%.f %:z")),
            Value::Null => write!(f, "NULL"),
        }
    }
}
