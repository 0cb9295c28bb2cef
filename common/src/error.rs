//! Error types raised while expanding target and port specs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the target expander.
#[derive(Error, Debug)]
pub enum TargetError {
    /// The target looked like CIDR notation but did not parse.
    #[error("invalid CIDR '{spec}': {reason}")]
    InvalidCidr { spec: String, reason: String },

    /// The block holds more addresses than a single scan will enumerate.
    #[error("CIDR block '{spec}' holds {size} addresses, the limit is {limit}")]
    BlockTooLarge { spec: String, size: u128, limit: u128 },

    /// A host file could not be read.
    #[error("failed to read host file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors produced by the port expander.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PortError {
    /// A token is not an integer in `0..=65535`.
    #[error("invalid port '{token}'")]
    InvalidPort { token: String },
}
