pub mod base;
pub mod mssql;
pub mod mysql;
pub mod postgres;

use crate::sql::{
    base::encoder::CopyValueEncoder, mssql::encoder::MsSqlCopyValueEncoder,
    mysql::encoder::MySqlCopyValueEncoder, postgres::encoder::PgCopyValueEncoder,
};
use model::core::data_type::SqlDialect;

/// The bulk-load encoder for a dialect.
pub fn encoder_for(dialect: SqlDialect) -> Box<dyn CopyValueEncoder + Send + Sync> {
    match dialect {
        SqlDialect::Postgres => Box::new(PgCopyValueEncoder::new()),
        SqlDialect::MySql => Box::new(MySqlCopyValueEncoder::new()),
        SqlDialect::MsSql => Box::new(MsSqlCopyValueEncoder::new()),
    }
}
