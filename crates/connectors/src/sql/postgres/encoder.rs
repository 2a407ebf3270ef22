use crate::sql::base::encoder::CopyValueEncoder;
use chrono::SecondsFormat;
use model::core::{utils::escape_csv_string, value::Value};

pub struct PgCopyValueEncoder;

impl PgCopyValueEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PgCopyValueEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyValueEncoder for PgCopyValueEncoder {
    fn encode_value(&self, value: &Value) -> String {
        match value {
            Value::Null => self.encode_null(),
            Value::String(s) => escape_csv_string(s),
            Value::Int(v) => v.to_string(),
            Value::Timestamp(ts) => ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
            Value::TimestampTz(ts) => ts.to_rfc3339_opts(SecondsFormat::Micros, true),
            // Postgres keeps the instant only; the explicit offset makes the input unambiguous.
            Value::TimestampOffset(ts) => ts.to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }

    fn encode_null(&self) -> String {
        "\\N".to_string()
    }
}
