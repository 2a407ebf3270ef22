use crate::error::CliError;
use codec::{StoredTimestampRecord, TimestampPolicy};
use model::core::{capability::ColumnCapability, timestamp::OffsetTimestamp};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EncodeReport {
    pub input: String,
    pub capability: ColumnCapability,
    pub policy: TimestampPolicy,
    pub record: StoredTimestampRecord,
    pub sql_literal: String,
    pub copy_text: String,
}

#[derive(Debug, Serialize)]
pub struct RoundTripReport {
    pub input: String,
    pub capability: ColumnCapability,
    pub policy: TimestampPolicy,
    pub decoded: String,
    pub instant_preserved: bool,
    pub offset_preserved: bool,
}

impl RoundTripReport {
    pub fn new(
        input: &OffsetTimestamp,
        decoded: &OffsetTimestamp,
        capability: ColumnCapability,
        policy: TimestampPolicy,
    ) -> Self {
        Self {
            input: input.to_string(),
            capability,
            policy,
            decoded: decoded.to_string(),
            instant_preserved: input.instant() == decoded.instant(),
            offset_preserved: input.utc_offset_minutes() == decoded.utc_offset_minutes(),
        }
    }
}

pub fn print_json<T: Serialize>(report: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
