//! Error types for subnet planning

use thiserror::Error;

/// Result type for planner operations
pub type Result<T> = std::result::Result<T, Error>;

/// Planner errors
///
/// Only malformed input surfaces here. A demand that does not fit in the
/// remaining address space is reported through the plan, not as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // CIDR errors
    #[error("Invalid CIDR: {0}")]
    InvalidCidr(String),

    #[error("Invalid prefix length: /{0} (must be 0-32)")]
    InvalidPrefix(u8),

    #[error("Network address {0} is not aligned to a /{1} boundary")]
    MisalignedNetwork(String, u8),

    #[error("Block {0} is not within {1}")]
    BlockOutOfRange(String, String),

    // Demand errors
    #[error("Invalid demand: {0}")]
    InvalidDemand(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Plan file errors
    #[error("Failed to read plan file {path}: {reason}")]
    PlanFile { path: String, reason: String },

    #[error("Failed to parse plan file {path}: {reason}")]
    PlanFormat { path: String, reason: String },
}

impl From<ipnet::AddrParseError> for Error {
    fn from(e: ipnet::AddrParseError) -> Self {
        Error::InvalidCidr(e.to_string())
    }
}

impl From<ipnet::PrefixLenError> for Error {
    fn from(e: ipnet::PrefixLenError) -> Self {
        Error::InvalidCidr(e.to_string())
    }
}

impl From<std::net::AddrParseError> for Error {
    fn from(e: std::net::AddrParseError) -> Self {
        Error::InvalidCidr(e.to_string())
    }
}
