//! 32-byte digests and the node hashing rule
//!
//! Every digest in the tree is a SHA-256 output. Leaves carry the digest of
//! their record as-is; an internal node carries
//!
//! ```text
//! H(left || right)
//! ```
//!
//! with the two child digests concatenated in left-then-right order and no
//! prefix byte.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest as _, Sha256};

use crate::error::{MerkleError, Result};

/// Digest length in bytes
pub const DIGEST_LEN: usize = 32;

/// Fixed-length hash output, compared byte for byte.
///
/// # Example
///
/// ```
/// use merkle_core::Digest;
///
/// let d = Digest::hash(b"tx1:Alice->Bob:100.00");
/// let parsed: Digest = d.to_hex().parse().unwrap();
/// assert_eq!(d, parsed);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub const fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// SHA-256 of arbitrary bytes
    pub fn hash(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; DIGEST_LEN] {
        self.0
    }

    /// Lowercase hex, always 64 characters
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse 64 hex characters, with or without a leading `0x`.
    ///
    /// # Errors
    /// - `InvalidDigest` if the text is not exactly 32 bytes of hex
    pub fn from_hex(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let body = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(body, &mut bytes)
            .map_err(|e| MerkleError::InvalidDigest(format!("{}: {:?}", e, text)))?;
        Ok(Self(bytes))
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Digest {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // short form keeps proof dumps readable
        write!(f, "Digest({}..)", &self.to_hex()[..16])
    }
}

/// Parent digest of two children: `H(left || right)`.
///
/// Construction and verification both go through this function, so the
/// concatenation order cannot drift between them.
///
/// # Example
///
/// ```
/// use merkle_core::{hash_node, Digest};
///
/// let left = Digest::new([0x01; 32]);
/// let right = Digest::new([0x02; 32]);
/// assert_ne!(hash_node(&left, &right), hash_node(&right, &left));
/// ```
pub fn hash_node(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(left.0);
    hasher.update(right.0);
    Digest(hasher.finalize().into())
}
