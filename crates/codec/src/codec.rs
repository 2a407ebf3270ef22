use crate::{error::CodecError, policy::TimestampPolicy, record::StoredTimestampRecord};
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use model::core::{
    capability::ColumnCapability,
    timestamp::{MAX_OFFSET_MINUTES, OffsetTimestamp},
    zone::{LocalResolution, SessionZone},
};
use tracing::{debug, trace};

/// Converts [`OffsetTimestamp`] values to column records and back.
///
/// The codec holds no state besides its policy and never looks at the host
/// process timezone: the only zone it ever consults is the session zone carried
/// by the column capability (on encode) or by the record itself (on decode).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffsetTimestampCodec {
    policy: TimestampPolicy,
}

impl OffsetTimestampCodec {
    pub fn new(policy: TimestampPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TimestampPolicy {
        self.policy
    }

    pub fn encode(
        &self,
        value: &OffsetTimestamp,
        column: &ColumnCapability,
    ) -> Result<StoredTimestampRecord, CodecError> {
        if !value.is_offset_in_range() {
            return Err(CodecError::OutOfRangeOffset {
                minutes: value.utc_offset_minutes(),
            });
        }

        let record = match column {
            ColumnCapability::OffsetAware => {
                let wall_clock = value
                    .wall_clock()
                    .ok_or_else(|| CodecError::DateOutOfRange(value.to_string()))?;
                StoredTimestampRecord::OffsetAware {
                    wall_clock,
                    offset_minutes: value.utc_offset_minutes(),
                }
            }
            _ if self.policy == TimestampPolicy::OffsetPreserving => {
                return Err(CodecError::UnsupportedColumnCapability {
                    capability: *column,
                });
            }
            ColumnCapability::UtcNormalized(zone) => {
                let instant = value.instant();
                whole_minutes(zone, &instant)?;
                StoredTimestampRecord::UtcNormalized {
                    instant_utc: instant.naive_utc(),
                    session_zone: *zone,
                }
            }
            ColumnCapability::WallClock(zone) => {
                let instant = value.instant();
                whole_minutes(zone, &instant)?;
                let wall_clock = zone.wall_clock(&instant);
                // A reading inside a fall-back overlap could not be mapped back to this instant.
                resolve_wall_clock(zone, &wall_clock)?;
                StoredTimestampRecord::WallClock {
                    wall_clock,
                    session_zone: *zone,
                }
            }
        };

        debug!(
            "Encoded {} for {} column under {} policy",
            value, column, self.policy
        );
        Ok(record)
    }

    pub fn decode(&self, record: &StoredTimestampRecord) -> Result<OffsetTimestamp, CodecError> {
        let capability = record.capability();
        if self.policy == TimestampPolicy::OffsetPreserving && !capability.has_offset_channel() {
            return Err(CodecError::UnsupportedColumnCapability { capability });
        }

        let value = match *record {
            StoredTimestampRecord::OffsetAware {
                wall_clock,
                offset_minutes,
            } => {
                if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&offset_minutes) {
                    return Err(CodecError::OutOfRangeOffset {
                        minutes: offset_minutes,
                    });
                }
                let instant = wall_clock
                    .checked_sub_signed(TimeDelta::minutes(i64::from(offset_minutes)))
                    .ok_or_else(|| CodecError::DateOutOfRange(wall_clock.to_string()))?
                    .and_utc();
                OffsetTimestamp::new(instant, offset_minutes)
            }
            StoredTimestampRecord::UtcNormalized {
                instant_utc,
                session_zone,
            } => {
                let instant = instant_utc.and_utc();
                OffsetTimestamp::new(instant, whole_minutes(&session_zone, &instant)?)
            }
            StoredTimestampRecord::WallClock {
                wall_clock,
                session_zone,
            } => {
                let instant = resolve_wall_clock(&session_zone, &wall_clock)?;
                OffsetTimestamp::new(instant, whole_minutes(&session_zone, &instant)?)
            }
        };

        trace!("Decoded {:?} into {}", record, value);
        Ok(value)
    }

    /// `decode(encode(value))`.
    pub fn round_trip(
        &self,
        value: &OffsetTimestamp,
        column: &ColumnCapability,
    ) -> Result<OffsetTimestamp, CodecError> {
        let record = self.encode(value, column)?;
        self.decode(&record)
    }
}

fn whole_minutes(zone: &SessionZone, instant: &DateTime<Utc>) -> Result<i32, CodecError> {
    let seconds = zone.offset_at(instant).local_minus_utc();
    if seconds % 60 != 0 {
        return Err(CodecError::SubMinuteOffset { seconds });
    }
    Ok(seconds / 60)
}

fn resolve_wall_clock(
    zone: &SessionZone,
    wall_clock: &NaiveDateTime,
) -> Result<DateTime<Utc>, CodecError> {
    match zone.resolve_local(wall_clock) {
        LocalResolution::Single(instant) => Ok(instant),
        LocalResolution::Ambiguous { .. } => Err(CodecError::AmbiguousLocalTime {
            wall_clock: *wall_clock,
            zone: *zone,
        }),
        LocalResolution::Nonexistent => Err(CodecError::NonexistentLocalTime {
            wall_clock: *wall_clock,
            zone: *zone,
        }),
    }
}
