use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Encode a timestamp for a column and print the stored record
    Encode {
        #[command(flatten)]
        column: ColumnArgs,
    },
    /// Encode and decode a timestamp, reporting whether instant and offset survived
    Roundtrip {
        #[command(flatten)]
        column: ColumnArgs,
    },
    /// Persist a timestamp into a sled-backed table, flush, and read it back
    Persist {
        #[command(flatten)]
        column: ColumnArgs,

        #[arg(long, help = "Directory of the sled database")]
        store: PathBuf,

        #[arg(long, default_value_t = 0, help = "Entity id")]
        id: i32,
    },
    /// Print the CREATE TABLE statement of the entity table
    Ddl {
        #[arg(long, help = "Column type of created_at, e.g. DATETIMEOFFSET")]
        column_type: String,

        #[arg(long, help = "SQL dialect: mssql, postgres or mysql")]
        dialect: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ColumnArgs {
    #[arg(long, help = "RFC 3339 timestamp, e.g. 1970-01-01T00:00:00-05:00")]
    pub value: String,

    #[arg(long, help = "Column type in the target dialect, e.g. DATETIME2")]
    pub column_type: String,

    #[arg(long, help = "SQL dialect: mssql, postgres or mysql")]
    pub dialect: Option<String>,

    #[arg(long, help = "Session zone of the database, e.g. UTC, +01:00, Europe/Vienna")]
    pub session_zone: Option<String>,

    #[arg(long, help = "instant-preserving (a) or offset-preserving (b)")]
    pub policy: Option<String>,
}
