//! LR CLI - Live reload decision engine.
//!
//! Provides commands for:
//! - `reload`: Decide a one-shot reload for zero or more paths
//! - `stream`: Ingest changed paths from stdin as one stream session
//! - `classify`: Show how paths are classified

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ClassifyArgs, ReloadArgs, StreamArgs};
use output::Output;

/// LR - Live reload decision engine.
#[derive(Parser)]
#[command(name = "lr", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover lr.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output (decision logs on stderr).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit reload events for changed paths (no paths: full reload).
    Reload(ReloadArgs),
    /// Read changed paths from stdin, one per line, as a single stream session.
    Stream(StreamArgs),
    /// Print the classification of each path.
    Classify(ClassifyArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG (errors only when unset)
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Reload(args) => args.execute(config),
        Commands::Stream(args) => args.execute(config),
        Commands::Classify(args) => args.execute(config),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
