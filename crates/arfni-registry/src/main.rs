//! Arfni registry generator
//!
//! Scans plugin manifests and writes the consolidated registry index, or
//! validates them only with `--validate-only`.

mod cli;
mod commands;
mod output;

use anyhow::{Context, Result};
use arfni_core::RegistryConfig;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("Error generating registry: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli)?;

    if cli.validate_only {
        commands::validate::run(&config, cli.quiet)
    } else {
        commands::generate::run(&config, cli.quiet)
    }
}

/// Embedded defaults, config file, environment, then CLI flags
fn load_config(cli: &Cli) -> Result<RegistryConfig> {
    let config = RegistryConfig::load(cli.config.as_deref())
        .context("Failed to load registry configuration")?
        .with_overrides(cli.overrides())
        .context("Invalid command-line override")?
        .resolve_repo_root()
        .context("Failed to resolve repository root")?;

    tracing::debug!("Repository root: {}", config.repo_root);
    Ok(config)
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
