pub mod capability;
pub mod data_type;
pub mod timestamp;
pub mod utils;
pub mod value;
pub mod zone;
