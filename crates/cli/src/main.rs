use crate::{commands::Commands, env::EnvManager, error::CliError, settings::CodecSettings};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod env;
mod error;
mod handlers;
mod output;
mod settings;

#[derive(Parser)]
#[command(
    name = "tzkeep",
    version = "0.0.1",
    about = "Offset timestamp persistence tool"
)]
struct Cli {
    #[arg(long, global = true, help = "Load settings from this .env file")]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let mut env = EnvManager::new();
    if let Some(path) = &cli.env_file {
        env.load_from_file(path)?;
    }
    let settings = CodecSettings::from_env(&env)?;
    debug!("Loaded settings: {:?}", settings);

    match cli.command {
        Commands::Encode { column } => {
            let report = handlers::encode(&settings, &column)?;
            output::print_json(&report)?;
        }
        Commands::Roundtrip { column } => {
            let report = handlers::round_trip(&settings, &column)?;
            output::print_json(&report)?;
        }
        Commands::Persist { column, store, id } => {
            let report = handlers::persist(&settings, &column, &store, id).await?;
            output::print_json(&report)?;
        }
        Commands::Ddl {
            column_type,
            dialect,
        } => {
            println!("{}", handlers::ddl(&settings, &column_type, dialect.as_deref())?);
        }
    }

    Ok(())
}
