//! CLI structure and argument parsing

use crate::commands::Commands;
use clap::Parser;
use std::path::PathBuf;

/// vlsm - split an IPv4 network into subnets sized to host demands
#[derive(Debug, Parser)]
#[command(name = "vlsm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Commands (defaults to `plan` with the built-in campus scenario)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}
