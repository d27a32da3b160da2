//! Command-line interface.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "ewyp")]
#[command(about = "Workplace accident reporting backend")]
#[command(version)]
pub struct Cli {
    /// Data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Start the HTTP API server
    Serve {
        /// Bind address: port, host, or host:port
        #[arg(short, long, default_value = "127.0.0.1:8000", env = "EWYP_BIND")]
        bind: String,
    },

    /// Show record counts and tool availability
    Status,

    /// Dump the form template's AcroForm field names
    Fields,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.data_dir.clone());

    match cli.command {
        Commands::Init => commands::cmd_init(&settings).await,
        Commands::Serve { bind } => commands::cmd_serve(&settings, &bind).await,
        Commands::Status => commands::cmd_status(&settings).await,
        Commands::Fields => commands::cmd_fields(&settings),
    }
}
