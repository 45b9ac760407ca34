//! Vigil CLI - command-line access to the operational safeguard engine.

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vigil_cli::commands;
use vigil_cli::{Cli, Command, Config, Formatter};

/// Exit code when a claim could not be verified.
const EXIT_UNVERIFIED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!(source = ?config.source, "Configuration loaded");

    // Command-line flags win over the config file
    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let color_enabled = !cli.no_color && config.output.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Lessons(args) => commands::execute_lessons(args, &config, &formatter)?,
        Command::Verify(args) => {
            if !commands::execute_verify(args, &config, &formatter)? {
                return Ok(ExitCode::from(EXIT_UNVERIFIED));
            }
        }
        Command::Monitor(args) => commands::execute_monitor(args, &config, &formatter)?,
        Command::Config => commands::execute_config(&config, &formatter)?,
    }

    Ok(ExitCode::SUCCESS)
}
