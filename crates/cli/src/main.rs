//! Artifact filter command line
//!
//! Computes filter rules from a build payload, estimates pass chances of a
//! single slot rule, and lists preset payloads.
//! Run with: `artifact-filter <command>`

mod commands;
mod report;

use anyhow::Result;
use clap::Parser;
use commands::{Chance, Compute, Presets};
use tracing_subscriber::EnvFilter;

/// Artifact filter configuration tools
#[derive(Parser)]
#[command(name = "artifact-filter")]
#[command(about = "Turns character builds into artifact filter rules", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Compute merged filter rules from a build payload
    Compute(Compute),

    /// Estimate how often a random item passes one slot rule
    Chance(Chance),

    /// List build payloads stored in a directory
    Presets(Presets),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for RUST_LOG and FILTER_PRESET_DIR)
    let _ = dotenvy::dotenv();

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Compute(cmd) => cmd.execute(),
        Command::Chance(cmd) => cmd.execute(),
        Command::Presets(cmd) => cmd.execute(),
    }
}

/// `RUST_LOG` directives when present and valid, `info` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
