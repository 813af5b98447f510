//! Init command implementation

use crate::{output, CliError, Result};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;
use vlsm_planner::PlanRequest;

#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Where to write the plan file
    #[arg(default_value = "vlsm-plan.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn execute(args: InitArgs) -> Result<ExitCode> {
    if args.path.exists() && !args.force {
        return Err(CliError::InvalidArgument(format!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        )));
    }

    let content = PlanRequest::reference().to_toml_string()?;
    std::fs::write(&args.path, content)?;

    output::success(&format!("Wrote sample plan to {}", args.path.display()));
    Ok(ExitCode::SUCCESS)
}
