//! vlsm - Variable Length Subnet Masking planner

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vlsm_cli::{output, Cli, CliConfig, Commands, Result};

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the plan itself
    let default_level = if cli.verbose { "debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = CliConfig::load(cli.config.as_deref())?;
    config.apply();

    // No command runs the default plan
    let command = cli.command.unwrap_or_else(Commands::default_plan);
    command.execute(&config)
}
