use crate::sql::base::encoder::CopyValueEncoder;
use chrono::{NaiveDateTime, Timelike};
use model::core::{utils::escape_csv_string, value::Value};

/// Encodes values for `BULK INSERT` with `DATETIME2`/`DATETIMEOFFSET` precision of 7.
pub struct MsSqlCopyValueEncoder;

impl MsSqlCopyValueEncoder {
    pub fn new() -> Self {
        Self
    }

    /// `YYYY-MM-DD hh:mm:ss.nnnnnnn`, 100ns resolution.
    fn format_datetime2(ts: &NaiveDateTime) -> String {
        // Leap-second nanos (>= 1e9) are clamped into the last tick.
        let ticks = (ts.nanosecond() / 100).min(9_999_999);
        format!("{}.{ticks:07}", ts.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl Default for MsSqlCopyValueEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyValueEncoder for MsSqlCopyValueEncoder {
    fn encode_value(&self, value: &Value) -> String {
        match value {
            Value::Null => self.encode_null(),
            Value::String(s) => escape_csv_string(s),
            Value::Int(v) => v.to_string(),
            Value::Timestamp(ts) => Self::format_datetime2(ts),
            Value::TimestampTz(ts) => format!("{} +00:00", Self::format_datetime2(&ts.naive_utc())),
            Value::TimestampOffset(ts) => format!(
                "{} {}",
                Self::format_datetime2(&ts.naive_local()),
                ts.format("%:z")
            ),
        }
    }

    fn encode_null(&self) -> String {
        String::new()
    }
}
