//! eecont CLI
//!
//! Command-line reference-data sync.
//!
//! # Commands
//!
//! - `sync` - Sync raw provider batches from a directory into the store
//! - `counts` - Display per-kind row counts of a store snapshot
//! - `version` - Show version information

mod commands;
mod source;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// eecont reference-data tools.
#[derive(Parser)]
#[command(name = "eecont")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the store snapshot file
    #[arg(global = true, short, long)]
    store: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(global = true, short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync raw provider batches into the store
    Sync {
        /// Directory holding one `<kind>.json` batch per kind
        #[arg(long)]
        source: PathBuf,

        /// Kinds to sync (default: every kind but region)
        kinds: Vec<String>,
    },

    /// Display per-kind row counts
    Counts {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

/// Log level for a `-v` count.
fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(cli.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Sync { source, kinds } => {
            commands::sync::run(&source, cli.store.as_deref(), &kinds)?;
        }
        Commands::Counts { format } => {
            let path = cli.store.ok_or("Store path required for counts")?;
            commands::counts::run(&path, &format)?;
        }
        Commands::Version => {
            println!("eecont CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("eecont core v{}", eecont_core::VERSION);
        }
    }

    Ok(())
}
