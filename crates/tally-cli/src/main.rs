//! Tally CLI - expense tracker with automatic categorization
//!
//! Usage:
//!   tally init                  Initialize database
//!   tally serve --port 3000     Start web server
//!   tally status                Show transaction counts
//!   tally suggest "uber ride"   Classify transaction text

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            host,
            port,
            no_auth,
        } => commands::cmd_serve(&cli.db, &host, port, no_auth, cli.no_encrypt).await,
        Commands::Status { user } => commands::cmd_status(&cli.db, cli.no_encrypt, &user),
        Commands::Suggest {
            description,
            merchant,
            no_fuzzy,
        } => commands::cmd_suggest(&description, &merchant, !no_fuzzy),
    }
}
