use crate::sql::base::encoder::CopyValueEncoder;
use model::core::{utils::escape_csv_string, value::Value};

/// Encodes values for `LOAD DATA`. `TIMESTAMP` columns are written as UTC wall
/// clocks, so the loading session must run with `time_zone = '+00:00'`.
pub struct MySqlCopyValueEncoder;

impl MySqlCopyValueEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MySqlCopyValueEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyValueEncoder for MySqlCopyValueEncoder {
    fn encode_value(&self, value: &Value) -> String {
        match value {
            Value::Null => self.encode_null(),
            Value::String(s) => escape_csv_string(s),
            Value::Int(v) => v.to_string(),
            Value::Timestamp(ts) => ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
            Value::TimestampTz(ts) => ts.naive_utc().format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
            Value::TimestampOffset(ts) => ts.format("%Y-%m-%d %H:%M:%S%.6f%:z").to_string(),
        }
    }

    fn encode_null(&self) -> String {
        "\\N".to_string()
    }
}
