//! confvault CLI - Confluence folder-tree backup and restore.
//!
//! Provides commands for:
//! - `backup`: Mirror the configured folder trees to local directories
//! - `restore`: Recreate a page from its saved artifacts

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BackupArgs, RestoreArgs};
use output::Output;

/// confvault - Confluence backup tool.
#[derive(Parser)]
#[command(name = "confvault", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Back up the configured folder trees.
    Backup(BackupArgs),
    /// Restore a page from saved artifacts.
    Restore(RestoreArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Backup(args) => args.verbose,
        Commands::Restore(args) => args.verbose,
    };

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Backup(args) => args.execute(),
        Commands::Restore(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
