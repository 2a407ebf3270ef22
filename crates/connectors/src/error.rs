use codec::CodecError;
use thiserror::Error;

/// All errors coming from the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A timestamp could not be converted to or from its column form.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// The embedded sled database failed.
    #[error("Sled error: {0}")]
    Sled(#[from] sled::Error),

    /// A row could not be (de)serialized.
    #[error("Row serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Row {key} not found in {table}")]
    NotFound { table: String, key: String },

    #[error("Column {column} missing from row of {table}")]
    MissingColumn { table: String, column: String },

    /// Refresh was requested for an entity whose staged changes were never flushed.
    #[error("Entity {0} has unflushed changes")]
    UnflushedChanges(String),

    /// The table schema is mis-configured.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}
