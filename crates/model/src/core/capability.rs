use crate::core::{data_type::DataType, zone::SessionZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a storage column can faithfully keep of an offset timestamp.
///
/// Capabilities are attached to columns when a schema is configured; nothing
/// inspects a driver at runtime to guess them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "session_zone", rename_all = "snake_case")]
pub enum ColumnCapability {
    /// Persists the wall clock together with its offset (e.g. `DATETIMEOFFSET`).
    OffsetAware,
    /// Persists the instant only; reads come back expressed in the session zone
    /// (e.g. Postgres `TIMESTAMPTZ`).
    UtcNormalized(SessionZone),
    /// Persists a naive wall clock tied to the session zone (e.g. `TIMESTAMP`).
    WallClock(SessionZone),
}

impl ColumnCapability {
    pub fn has_offset_channel(&self) -> bool {
        matches!(self, ColumnCapability::OffsetAware)
    }

    pub fn session_zone(&self) -> Option<SessionZone> {
        match self {
            ColumnCapability::OffsetAware => None,
            ColumnCapability::UtcNormalized(zone) | ColumnCapability::WallClock(zone) => {
                Some(*zone)
            }
        }
    }

    /// Resolves the capability of a column of the given type. Non-temporal types have none.
    pub fn for_column(data_type: &DataType, session_zone: SessionZone) -> Option<Self> {
        match data_type {
            DataType::TimestampOffset => Some(ColumnCapability::OffsetAware),
            DataType::TimestampTz => Some(ColumnCapability::UtcNormalized(session_zone)),
            DataType::Timestamp => Some(ColumnCapability::WallClock(session_zone)),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnCapability::OffsetAware => write!(f, "offset-aware"),
            ColumnCapability::UtcNormalized(zone) => write!(f, "utc-normalized({zone})"),
            ColumnCapability::WallClock(zone) => write!(f, "wall-clock({zone})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_column() {
        let vienna: SessionZone = "Europe/Vienna".parse().unwrap();
        assert_eq!(
            ColumnCapability::for_column(&DataType::TimestampOffset, vienna),
            Some(ColumnCapability::OffsetAware)
        );
        assert_eq!(
            ColumnCapability::for_column(&DataType::Timestamp, vienna),
            Some(ColumnCapability::WallClock(vienna))
        );
        assert_eq!(
            ColumnCapability::for_column(&DataType::TimestampTz, vienna),
            Some(ColumnCapability::UtcNormalized(vienna))
        );
        assert_eq!(ColumnCapability::for_column(&DataType::Int, vienna), None);
    }

    #[test]
    fn test_offset_channel() {
        assert!(ColumnCapability::OffsetAware.has_offset_channel());
        assert!(!ColumnCapability::WallClock(SessionZone::utc()).has_offset_channel());
        assert_eq!(ColumnCapability::OffsetAware.session_zone(), None);
    }

    #[test]
    fn test_serde_shape() {
        let cap = ColumnCapability::WallClock("Europe/Vienna".parse().unwrap());
        let json = serde_json::to_value(cap).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "wall_clock", "session_zone": "Europe/Vienna"})
        );
        let back: ColumnCapability = serde_json::from_value(json).unwrap();
        assert_eq!(back, cap);
    }
}
