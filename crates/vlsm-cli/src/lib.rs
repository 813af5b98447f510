//! vlsm CLI library

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use commands::Commands;
pub use config::CliConfig;
pub use error::{CliError, Result};
