use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use model::core::{data_type::DataType, utils::unescape_csv_string, value::Value};

/// Parses one field of a bulk export back into a value of the column's type.
///
/// `\N` and the empty string read as NULL. Returns `None` when the text does not
/// parse as the column type.
pub fn parse_column_text(raw: &str, data_type: &DataType) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "\\N" {
        return Some(Value::Null);
    }

    match data_type {
        DataType::Int | DataType::BigInt => trimmed.parse::<i64>().ok().map(Value::Int),
        DataType::VarChar | DataType::Text | DataType::Custom(_) => {
            Some(Value::String(unescape_csv_string(trimmed)))
        }
        DataType::Timestamp => parse_naive_datetime(trimmed).map(Value::Timestamp),
        DataType::TimestampTz => parse_datetime(trimmed).map(Value::TimestampTz),
        DataType::TimestampOffset => parse_offset_datetime(trimmed).map(Value::TimestampOffset),
    }
}

/// Text without an offset is taken as UTC: normalized columns are exported in UTC.
fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Some(dt) = parse_offset_datetime(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    parse_naive_datetime(raw).map(|naive| naive.and_utc())
}

fn parse_offset_datetime(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f %:z"))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z"))
        .ok()
}

fn parse_naive_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}
