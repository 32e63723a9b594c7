//! Merkle tree with compact inclusion proofs
//!
//! Builds an immutable SHA-256 binary hash tree over an ordered list of
//! transaction digests, publishes its root, and proves that a given
//! transaction is in the committed set with one sibling digest per level.
//!
//! # Quick Start
//!
//! ```rust
//! use merkle_core::{verify, MerkleTree, LeafHasher, Sha256Leaf};
//!
//! let records = ["tx1:Alice->Bob:100.00", "tx2:Bob->Charlie:50.00", "tx3:Charlie->Dave:75.00"];
//! let leaves: Vec<_> = records.iter().map(|r| Sha256Leaf.hash(*r)).collect();
//!
//! // Build tree and publish the root
//! let tree = MerkleTree::build(leaves.iter().copied()).unwrap();
//! let root = tree.root_digest();
//!
//! // Prove and verify inclusion of the third record
//! let proof = tree.prove_inclusion(2).unwrap();
//! assert!(verify(&leaves[2], &proof, &root));
//! ```
//!
//! # Tree shape
//!
//! - leaves are the record digests, never hashed again
//! - parents are `SHA-256(left || right)`
//! - an odd level longer than one node pairs its last node with itself
//!
//! The self-pairing rule means a tree over `[a, b, c]` and a tree over
//! `[a, b, c, c]` share a root. Callers that need to tell those apart must
//! commit to the leaf count separately.

pub mod digest;
pub mod error;
pub mod leaf;
pub mod node;
pub mod proof;
pub mod tree;
pub mod verify;

// Re-export commonly used types
pub use digest::{hash_node, Digest, DIGEST_LEN};
pub use error::{MerkleError, Result};
pub use leaf::{encode_field, hash_records, LeafEncode, LeafHasher, Sha256Leaf};
pub use node::Node;
pub use proof::{Proof, ProofStep, Side};
pub use tree::MerkleTree;
pub use verify::verify;
