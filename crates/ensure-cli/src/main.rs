//! # ensure CLI entry point
//!
//! Parses command-line arguments, applies the enforcement configuration and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ensure_cli::check::{run_check, CheckArgs};
use ensure_cli::config::{resolve_enforcement, EnsureConfig, ENFORCE_ENV};
use ensure_cli::record::{run_record, RecordArgs};
use ensure_cli::types::run_types;

/// Runtime type assertions for JSON values.
#[derive(Parser, Debug)]
#[command(name = "ensure", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable enforcement of non-forced checks.
    #[arg(long, global = true)]
    no_enforce: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a JSON value against a type descriptor.
    Check(CheckArgs),

    /// Build a record from a schema file and a values file.
    Record(RecordArgs),

    /// List the supported type descriptors.
    Types,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match cli.config.as_deref().map(EnsureConfig::load).transpose() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    let env_value = std::env::var(ENFORCE_ENV).ok();
    let enforce = resolve_enforcement(config.as_ref(), env_value.as_deref(), cli.no_enforce);
    ensure_core::set_enforced(enforce);
    tracing::debug!(enforce, "enforcement resolved");

    let result = match cli.command {
        Commands::Check(args) => run_check(&args),
        Commands::Record(args) => run_record(&args),
        Commands::Types => run_types(),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
