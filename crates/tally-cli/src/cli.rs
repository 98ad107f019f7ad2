//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tally", version, about = "Expense tracker with automatic categorization")]
pub struct Cli {
    /// Database file path
    #[arg(long, global = true, default_value_os_t = default_db_path())]
    pub db: PathBuf,

    /// Use an unencrypted database (not recommended outside development)
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and run migrations
    Init,

    /// Start the web server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,

        /// Disable authentication (development only)
        #[arg(long)]
        no_auth: bool,
    },

    /// Show transaction counts per partition
    Status {
        /// User to inspect
        #[arg(long, default_value = "local-dev")]
        user: String,
    },

    /// Suggest a category for transaction text
    Suggest {
        /// Transaction description
        description: String,

        /// Merchant name
        #[arg(long, default_value = "")]
        merchant: String,

        /// Disable the fuzzy (single-typo) fallback
        #[arg(long)]
        no_fuzzy: bool,
    },
}

/// Default database location: ~/.local/share/tally/tally.db (or platform
/// equivalent), falling back to the working directory.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("tally").join("tally.db"))
        .unwrap_or_else(|| PathBuf::from("tally.db"))
}
