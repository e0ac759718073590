//! Command-line front-end for the character sheet engine.
//!
//! Run with: `sheet <command> <CHARACTER>`

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Check, Derive, Explain};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Derive and explain character sheets
#[derive(Parser)]
#[command(name = "sheet")]
#[command(about = "Derive Pathfinder character sheets from data files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a derivation pass and print the results
    Derive(Derive),

    /// Show what contributed to one sheet path
    Explain(Explain),

    /// Report formula failures and content violations
    Check(Check),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Derive(cmd) => cmd.execute(),
        Command::Explain(cmd) => cmd.execute(),
        Command::Check(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr so `--format json` output stays clean. Defaults to
/// warnings; override with `RUST_LOG`.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn explain_takes_character_then_path() {
        let cli = Cli::try_parse_from([
            "sheet",
            "explain",
            "valeros.ron",
            "attributes.ac.normal.total",
            "--items",
            "core.ron",
            "--items",
            "buffs.ron",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Explain(_)));
    }
}
