pub mod entity;
pub mod error;
pub mod schema;
pub mod session;
pub mod sql;
pub mod store;
