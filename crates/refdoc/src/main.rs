//! refdoc CLI - C++ API reference for reStructuredText documents.
//!
//! Provides commands for:
//! - `build`: Expand API directives in changed and outdated documents
//! - `outdated`: List documents whose API entities changed
//! - `dump`: Print the declaration model as JSON
//! - `extract`: Run the extraction tool

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use refdoc_config::Flags;
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, DumpArgs};
use output::Output;

/// refdoc - C++ API reference for reStructuredText documents.
#[derive(Parser)]
#[command(name = "refdoc", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover refdoc.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand API directives of modified and outdated documents.
    Build(BuildArgs),
    /// List documents whose API entities changed since they were expanded.
    Outdated,
    /// Print the declaration model as JSON.
    Dump(DumpArgs),
    /// Run the extraction tool unconditionally.
    Extract,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose or REFDOC_DEBUG enable DEBUG, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose || Flags::from_env().debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Build(args) => args.execute(config),
        Commands::Outdated => commands::outdated::execute(config),
        Commands::Dump(args) => args.execute(config),
        Commands::Extract => commands::extract::execute(config),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
