use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How to treat columns that cannot store a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampPolicy {
    /// Keep the instant; the offset read back is the session zone's offset.
    InstantPreserving,
    /// Keep instant and offset; refuse columns without an offset channel.
    #[default]
    OffsetPreserving,
}

impl FromStr for TimestampPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "instant" | "instant-preserving" => Ok(TimestampPolicy::InstantPreserving),
            "b" | "offset" | "offset-preserving" => Ok(TimestampPolicy::OffsetPreserving),
            other => Err(format!("Unknown timestamp policy: {other}")),
        }
    }
}

impl fmt::Display for TimestampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampPolicy::InstantPreserving => write!(f, "instant-preserving"),
            TimestampPolicy::OffsetPreserving => write!(f, "offset-preserving"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "A".parse::<TimestampPolicy>().unwrap(),
            TimestampPolicy::InstantPreserving
        );
        assert_eq!(
            "offset-preserving".parse::<TimestampPolicy>().unwrap(),
            TimestampPolicy::OffsetPreserving
        );
        assert!("c".parse::<TimestampPolicy>().is_err());
        assert_eq!(TimestampPolicy::default(), TimestampPolicy::OffsetPreserving);
    }
}
