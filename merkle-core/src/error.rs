/// Error type definitions
use thiserror::Error;

/// Errors raised while building a tree or asking it for a proof.
///
/// Verification never produces one of these: a bad proof is simply
/// reported as `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// A tree needs at least one leaf
    #[error("Cannot build tree from empty input")]
    EmptyInput,

    /// Proof requested for a leaf position the tree does not have
    #[error("Leaf index out of range: {index} (total leaves: {total})")]
    IndexOutOfRange { index: usize, total: usize },

    /// Digest text was not 64 hex characters
    #[error("Invalid digest: {0}")]
    InvalidDigest(String),
}

pub type Result<T> = std::result::Result<T, MerkleError>;
