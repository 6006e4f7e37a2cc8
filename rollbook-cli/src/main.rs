//! rollbook CLI - student record ingestion service
//!
//! Entry point for the `rollbook` binary. `rollbook serve` exposes
//! `POST /add_record` backed by SQLite (default) or PostgreSQL.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "rollbook",
    author,
    version,
    about = "Student record ingestion service backed by SQLite or PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API (POST /add_record)
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Environment from .env must be in place before clap reads it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
    }
    Ok(())
}
