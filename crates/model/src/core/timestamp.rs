use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest UTC offset, in minutes and in either direction, a timestamp may be stored with.
pub const MAX_OFFSET_MINUTES: i32 = 18 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    /// The offset carries a seconds component (e.g. historic local mean time).
    #[error("Offset of {seconds}s is not a whole number of minutes")]
    SubMinuteOffset { seconds: i32 },

    #[error("Invalid RFC 3339 timestamp '{input}': {reason}")]
    Parse { input: String, reason: String },
}

/// An absolute point in time together with the UTC offset it was expressed in.
///
/// The offset is metadata describing how the value was written down by the caller,
/// it never shifts `instant`. Two values are equal only when both the instant and
/// the offset match, so `10:00+01:00` and `09:00Z` are different values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OffsetTimestamp {
    instant: DateTime<Utc>,
    utc_offset_minutes: i32,
}

impl OffsetTimestamp {
    /// Builds a value without validating the offset; range checks happen when the value
    /// is encoded for storage.
    pub fn new(instant: DateTime<Utc>, utc_offset_minutes: i32) -> Self {
        Self {
            instant,
            utc_offset_minutes,
        }
    }

    pub fn from_datetime(dt: DateTime<FixedOffset>) -> Result<Self, TimestampError> {
        let seconds = dt.offset().local_minus_utc();
        if seconds % 60 != 0 {
            return Err(TimestampError::SubMinuteOffset { seconds });
        }
        Ok(Self::new(dt.with_timezone(&Utc), seconds / 60))
    }

    pub fn parse_rfc3339(input: &str) -> Result<Self, TimestampError> {
        let dt = DateTime::parse_from_rfc3339(input.trim()).map_err(|e| TimestampError::Parse {
            input: input.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_datetime(dt)
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    pub fn is_offset_in_range(&self) -> bool {
        (-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&self.utc_offset_minutes)
    }

    /// The offset as a chrono `FixedOffset`, if chrono can represent it (under 24h).
    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes.checked_mul(60)?)
    }

    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.offset().map(|offset| self.instant.with_timezone(&offset))
    }

    /// The local wall-clock reading at the original offset.
    pub fn wall_clock(&self) -> Option<NaiveDateTime> {
        self.instant
            .naive_utc()
            .checked_add_signed(TimeDelta::minutes(i64::from(self.utc_offset_minutes)))
    }
}

impl fmt::Display for OffsetTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
            None => write!(
                f,
                "{} ({})",
                self.instant.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                format_offset_minutes(self.utc_offset_minutes)
            ),
        }
    }
}

/// Renders an offset in minutes as `+HH:MM` / `-HH:MM`.
pub fn format_offset_minutes(minutes: i32) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let abs = minutes.unsigned_abs();
    format!("{sign}{:02}:{:02}", abs / 60, abs % 60)
}
