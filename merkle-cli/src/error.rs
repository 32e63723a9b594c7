//! CLI error types
//!
//! Every failure the `merkle` tool can hit while loading configuration,
//! reading record or proof files, or asking the tree for a proof.

use merkle_core::MerkleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file is malformed or fails validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record or proof file is not valid JSON for its schema
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Tree construction or proof generation failed
    #[error("Merkle error: {0}")]
    Merkle(#[from] MerkleError),

    /// Arguments or file contents make no sense together
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CliError>;

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}
