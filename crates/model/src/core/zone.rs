use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid session zone '{0}'")]
pub struct ZoneParseError(pub String);

/// The fixed reference zone a database session interprets offset-less values in.
///
/// There is deliberately no "local" variant: a session zone always comes from
/// configuration, never from the host process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SessionZone {
    Fixed(FixedOffset),
    Named(Tz),
}

/// Outcome of mapping a wall-clock reading back onto the time line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalResolution {
    Single(DateTime<Utc>),
    /// The reading occurs twice (clocks were turned back).
    Ambiguous {
        earliest: DateTime<Utc>,
        latest: DateTime<Utc>,
    },
    /// The reading was skipped (clocks were turned forward).
    Nonexistent,
}

impl SessionZone {
    pub fn utc() -> Self {
        SessionZone::Fixed(Utc.fix())
    }

    /// Offset of this zone at the given instant.
    pub fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        match self {
            SessionZone::Fixed(offset) => *offset,
            SessionZone::Named(tz) => tz.offset_from_utc_datetime(&instant.naive_utc()).fix(),
        }
    }

    /// Wall-clock reading of `instant` in this zone.
    pub fn wall_clock(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.offset_at(instant)).naive_local()
    }

    pub fn resolve_local(&self, wall_clock: &NaiveDateTime) -> LocalResolution {
        match self {
            SessionZone::Fixed(offset) => Self::map_local(offset.from_local_datetime(wall_clock)),
            SessionZone::Named(tz) => Self::map_local(tz.from_local_datetime(wall_clock)),
        }
    }

    fn map_local<Z: TimeZone>(result: LocalResult<DateTime<Z>>) -> LocalResolution {
        match result {
            LocalResult::Single(dt) => LocalResolution::Single(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(a, b) => {
                let (a, b) = (a.with_timezone(&Utc), b.with_timezone(&Utc));
                LocalResolution::Ambiguous {
                    earliest: a.min(b),
                    latest: a.max(b),
                }
            }
            LocalResult::None => LocalResolution::Nonexistent,
        }
    }

    fn parse_fixed(raw: &str) -> Option<FixedOffset> {
        let (sign, digits) = match raw.as_bytes().first()? {
            b'+' => (1, &raw[1..]),
            b'-' => (-1, &raw[1..]),
            _ => return None,
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit() || b == b':') {
            return None;
        }
        let (hours, minutes) = match digits.split_once(':') {
            Some((h, m)) => (h, m),
            None if digits.len() == 4 => digits.split_at(2),
            None => (digits, "0"),
        };
        let hours: i32 = hours.parse().ok()?;
        let minutes: i32 = minutes.parse().ok()?;
        if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
            return None;
        }
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
    }
}

impl FromStr for SessionZone {
    type Err = ZoneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.eq_ignore_ascii_case("utc") || raw == "Z" {
            return Ok(SessionZone::utc());
        }
        if raw.starts_with('+') || raw.starts_with('-') {
            return Self::parse_fixed(raw)
                .map(SessionZone::Fixed)
                .ok_or_else(|| ZoneParseError(s.to_string()));
        }
        raw.parse::<Tz>()
            .map(SessionZone::Named)
            .map_err(|_| ZoneParseError(s.to_string()))
    }
}

impl TryFrom<String> for SessionZone {
    type Error = ZoneParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SessionZone> for String {
    fn from(zone: SessionZone) -> Self {
        zone.to_string()
    }
}

impl fmt::Display for SessionZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionZone::Fixed(offset) if offset.local_minus_utc() == 0 => write!(f, "UTC"),
            SessionZone::Fixed(offset) => write!(f, "{offset}"),
            SessionZone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}
