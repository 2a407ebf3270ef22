use codec::CodecError;
use connectors::error::StoreError;
use model::core::timestamp::TimestampError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid timestamp: {0}")]
    Timestamp(#[from] TimestampError),

    #[error("Failed to convert timestamp: {0}")]
    Codec(#[from] CodecError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}
