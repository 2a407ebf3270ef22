pub mod codec;
pub mod error;
pub mod policy;
pub mod record;

pub use codec::OffsetTimestampCodec;
pub use error::CodecError;
pub use policy::TimestampPolicy;
pub use record::StoredTimestampRecord;
