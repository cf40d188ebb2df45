//! passguard CLI tool.
//!
//! Usage:
//! ```bash
//! passguard check [OPTIONS] [--password <PASSWORD>]
//! passguard list-rules
//! passguard init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use passguard_core::Weight;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Checks passwords against a weighted password policy
#[derive(Parser)]
#[command(name = "passguard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a password against the policy
    Check {
        /// Password to check (read from stdin if omitted)
        #[arg(short, long, env = "PASSGUARD_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// JSON file with former passwords: `[{"hash": "...", "date": "..."}]`
        #[arg(long)]
        history: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Ignore violated constraints weighing less than this
        #[arg(short, long, allow_negative_numbers = true)]
        weight: Option<Weight>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable diagnostics.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            password,
            history,
            format,
            rules,
            weight,
        } => {
            let cwd = std::env::current_dir()?;
            let source = config_resolver::resolve(&cwd, cli.config.as_deref());
            let options = commands::check::CheckOptions {
                password,
                history,
                format,
                rules,
                weight,
            };
            commands::check::run(options, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
