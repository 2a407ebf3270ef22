use crate::error::CodecError;
use chrono::{FixedOffset, NaiveDateTime, TimeZone};
use model::core::{capability::ColumnCapability, value::Value, zone::SessionZone};
use serde::{Deserialize, Serialize};

/// The column-level representation of an offset timestamp.
///
/// Each variant corresponds to one [`ColumnCapability`]; a record always knows
/// the session zone its contents are relative to, so decoding needs nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoredTimestampRecord {
    OffsetAware {
        wall_clock: NaiveDateTime,
        offset_minutes: i32,
    },
    UtcNormalized {
        instant_utc: NaiveDateTime,
        session_zone: SessionZone,
    },
    WallClock {
        wall_clock: NaiveDateTime,
        session_zone: SessionZone,
    },
}

impl StoredTimestampRecord {
    pub fn capability(&self) -> ColumnCapability {
        match self {
            StoredTimestampRecord::OffsetAware { .. } => ColumnCapability::OffsetAware,
            StoredTimestampRecord::UtcNormalized { session_zone, .. } => {
                ColumnCapability::UtcNormalized(*session_zone)
            }
            StoredTimestampRecord::WallClock { session_zone, .. } => {
                ColumnCapability::WallClock(*session_zone)
            }
        }
    }

    /// The value a driver would bind for this record.
    pub fn to_value(&self) -> Result<Value, CodecError> {
        match *self {
            StoredTimestampRecord::OffsetAware {
                wall_clock,
                offset_minutes,
            } => {
                let offset = offset_minutes
                    .checked_mul(60)
                    .and_then(FixedOffset::east_opt)
                    .ok_or(CodecError::OutOfRangeOffset {
                        minutes: offset_minutes,
                    })?;
                offset
                    .from_local_datetime(&wall_clock)
                    .single()
                    .map(Value::TimestampOffset)
                    .ok_or_else(|| CodecError::DateOutOfRange(wall_clock.to_string()))
            }
            StoredTimestampRecord::UtcNormalized { instant_utc, .. } => {
                Ok(Value::TimestampTz(instant_utc.and_utc()))
            }
            StoredTimestampRecord::WallClock { wall_clock, .. } => Ok(Value::Timestamp(wall_clock)),
        }
    }

    /// Rebuilds a record from a value read out of a column with the given capability.
    pub fn from_value(value: &Value, capability: &ColumnCapability) -> Result<Self, CodecError> {
        match (capability, value) {
            (ColumnCapability::OffsetAware, Value::TimestampOffset(dt)) => {
                let seconds = dt.offset().local_minus_utc();
                if seconds % 60 != 0 {
                    return Err(CodecError::SubMinuteOffset { seconds });
                }
                Ok(StoredTimestampRecord::OffsetAware {
                    wall_clock: dt.naive_local(),
                    offset_minutes: seconds / 60,
                })
            }
            (ColumnCapability::UtcNormalized(zone), Value::TimestampTz(dt)) => {
                Ok(Self::utc_normalized(dt.naive_utc(), *zone))
            }
            // Some drivers hand normalized columns back already shifted into the session offset.
            (ColumnCapability::UtcNormalized(zone), Value::TimestampOffset(dt)) => {
                Ok(Self::utc_normalized(dt.naive_utc(), *zone))
            }
            (ColumnCapability::WallClock(zone), Value::Timestamp(wall_clock)) => {
                Ok(StoredTimestampRecord::WallClock {
                    wall_clock: *wall_clock,
                    session_zone: *zone,
                })
            }
            (expected, found) => Err(CodecError::ValueMismatch {
                expected: *expected,
                found: found
                    .data_type()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "NULL".to_string()),
            }),
        }
    }

    fn utc_normalized(instant_utc: NaiveDateTime, session_zone: SessionZone) -> Self {
        StoredTimestampRecord::UtcNormalized {
            instant_utc,
            session_zone,
        }
    }
}
