//! Record → leaf digest mapping
//!
//! A record contributes to the tree only through its digest. The digest is
//! SHA-256 over the record's canonical encoding, which each record type
//! supplies through [`LeafEncode`]. Composite records should length-prefix
//! every variable-size field with [`encode_field`] so that no two distinct
//! records share an encoding.

use crate::digest::Digest;

/// Maps a record to its leaf digest.
pub trait LeafHasher<R: ?Sized> {
    fn hash(&self, record: &R) -> Digest;
}

/// Canonical byte encoding of a record.
pub trait LeafEncode {
    /// Append the encoding to `out`. Must be deterministic.
    fn encode_leaf(&self, out: &mut Vec<u8>);
}

/// Stateless SHA-256 leaf hasher.
///
/// # Example
///
/// ```
/// use merkle_core::{Digest, LeafHasher, Sha256Leaf};
///
/// let digest = Sha256Leaf.hash(b"tx-1".as_slice());
/// assert_eq!(digest, Digest::hash(b"tx-1"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Leaf;

impl<R: LeafEncode + ?Sized> LeafHasher<R> for Sha256Leaf {
    fn hash(&self, record: &R) -> Digest {
        let mut buf = Vec::new();
        record.encode_leaf(&mut buf);
        Digest::hash(&buf)
    }
}

/// Write `bytes` preceded by its length as a 4-byte big-endian integer.
///
/// Fields longer than `u32::MAX` bytes are not representable; the length
/// saturates, which only matters for inputs far beyond any record size.
pub fn encode_field(out: &mut Vec<u8>, bytes: &[u8]) {
    let len = u32::try_from(bytes.len()).unwrap_or(u32::MAX);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(bytes);
}

/// Hash every record in order.
pub fn hash_records<'a, R, H, I>(hasher: &H, records: I) -> Vec<Digest>
where
    R: ?Sized + 'a,
    H: LeafHasher<R>,
    I: IntoIterator<Item = &'a R>,
{
    records.into_iter().map(|r| hasher.hash(r)).collect()
}

impl LeafEncode for [u8] {
    fn encode_leaf(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }
}

impl<const N: usize> LeafEncode for [u8; N] {
    fn encode_leaf(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }
}

impl LeafEncode for Vec<u8> {
    fn encode_leaf(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }
}

impl LeafEncode for str {
    fn encode_leaf(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }
}

impl LeafEncode for String {
    fn encode_leaf(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }
}
