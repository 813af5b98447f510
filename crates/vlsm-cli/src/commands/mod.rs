//! Command implementations

pub mod init;
pub mod plan;

use crate::{CliConfig, Result};
use clap::Subcommand;
use std::process::ExitCode;

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Allocate subnets for a base network and print the plan
    Plan(plan::PlanArgs),

    /// Write a sample plan file
    Init(init::InitArgs),
}

impl Commands {
    /// `plan` with no flags: the built-in campus scenario
    pub fn default_plan() -> Self {
        Commands::Plan(plan::PlanArgs::default())
    }

    pub fn execute(self, config: &CliConfig) -> Result<ExitCode> {
        match self {
            Commands::Plan(args) => plan::execute(args, config),
            Commands::Init(args) => init::execute(args),
        }
    }
}
