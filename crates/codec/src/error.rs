use chrono::NaiveDateTime;
use model::core::{capability::ColumnCapability, zone::SessionZone};
use thiserror::Error;

/// Errors raised while converting offset timestamps to and from column values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Offset-preserving semantics were requested for a column without an offset channel.
    #[error("Column capability {capability} cannot carry a UTC offset")]
    UnsupportedColumnCapability { capability: ColumnCapability },

    /// The offset lies outside the representable range.
    #[error("UTC offset of {minutes} minutes is outside -18:00..+18:00")]
    OutOfRangeOffset { minutes: i32 },

    /// The wall clock occurs twice in the session zone.
    #[error("Wall clock {wall_clock} is ambiguous in session zone {zone}")]
    AmbiguousLocalTime {
        wall_clock: NaiveDateTime,
        zone: SessionZone,
    },

    /// The wall clock was skipped by a transition in the session zone.
    #[error("Wall clock {wall_clock} does not exist in session zone {zone}")]
    NonexistentLocalTime {
        wall_clock: NaiveDateTime,
        zone: SessionZone,
    },

    /// An offset with a seconds component (e.g. historic local mean time).
    #[error("Offset of {seconds}s is not a whole number of minutes")]
    SubMinuteOffset { seconds: i32 },

    /// Shifting by the offset leaves the supported date range.
    #[error("Timestamp {0} is outside the supported date range")]
    DateOutOfRange(String),

    /// A column value does not fit the column's declared capability.
    #[error("Value of type {found} does not fit a {expected} column")]
    ValueMismatch {
        expected: ColumnCapability,
        found: String,
    },
}
