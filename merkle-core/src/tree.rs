//! Merkle tree construction and proof generation
//!
//! ```text
//!            root = H(n01 || n23)
//!           /                    \
//!   n01 = H(d0 || d1)      n23 = H(d2 || d3)
//!    /          \            /          \
//!   d0          d1          d2          d3
//! ```
//!
//! Levels are stored bottom-up, `levels[0]` being the leaves and the last
//! level holding only the root. Odd levels longer than one node pair their
//! last node with itself (see [`crate::node`]).

use tracing::{debug, trace};

use crate::digest::Digest;
use crate::error::{MerkleError, Result};
use crate::leaf::{hash_records, LeafHasher};
use crate::node::{pair_at, pair_level, Node};
use crate::proof::{Proof, ProofStep, Side};

/// Immutable binary hash tree over an ordered list of leaf digests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// `levels[0]` = leaves, `levels[height]` = `[root]`
    levels: Vec<Vec<Node>>,
}

impl MerkleTree {
    /// Build a tree from leaf digests in order.
    ///
    /// Leaf digests are wrapped as-is. Every odd level longer than one node
    /// pairs its last node with itself; parents are `H(left || right)`.
    ///
    /// # Errors
    /// - `EmptyInput` if there are no digests
    ///
    /// # Example
    ///
    /// ```
    /// use merkle_core::{hash_node, Digest, MerkleTree};
    ///
    /// let d: Vec<Digest> = (0..4u8).map(|i| Digest::hash(&[i])).collect();
    /// let tree = MerkleTree::build(d.iter().copied()).unwrap();
    ///
    /// let expected = hash_node(&hash_node(&d[0], &d[1]), &hash_node(&d[2], &d[3]));
    /// assert_eq!(tree.root_digest(), expected);
    /// ```
    pub fn build<I>(leaf_digests: I) -> Result<Self>
    where
        I: IntoIterator<Item = Digest>,
    {
        let leaves: Vec<Node> = leaf_digests.into_iter().map(Node::Leaf).collect();
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let mut levels = Vec::with_capacity(height_for(leaves.len()) + 1);
        levels.push(leaves);

        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let next = pair_level(current);
            levels.push(next);
        }

        let tree = MerkleTree { levels };
        debug!(
            "Built Merkle tree: {} leaves, height {}, root {}",
            tree.leaf_count(),
            tree.height(),
            tree.root_digest()
        );
        Ok(tree)
    }

    /// Hash `records` with `hasher`, then [`build`](Self::build).
    pub fn from_records<'a, R, H, I>(hasher: &H, records: I) -> Result<Self>
    where
        R: ?Sized + 'a,
        H: LeafHasher<R>,
        I: IntoIterator<Item = &'a R>,
    {
        Self::build(hash_records(hasher, records))
    }

    /// Digest committing to every leaf and its position
    pub fn root_digest(&self) -> Digest {
        // build never leaves a level empty
        self.levels
            .last()
            .and_then(|level| level.first())
            .map(|node| *node.digest())
            .unwrap_or_default()
    }

    pub fn root_hex(&self) -> String {
        self.root_digest().to_hex()
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Pairing levels above the leaves; 0 for a single-leaf tree
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn leaf(&self, index: usize) -> Option<Digest> {
        self.levels[0].get(index).map(|node| *node.digest())
    }

    /// Leaf digests in input order
    pub fn leaves(&self) -> impl ExactSizeIterator<Item = Digest> + '_ {
        self.levels[0].iter().map(|node| *node.digest())
    }

    /// Levels bottom-up, leaves first
    pub fn levels(&self) -> impl ExactSizeIterator<Item = &[Node]> + '_ {
        self.levels.iter().map(Vec::as_slice)
    }

    pub fn node(&self, level: usize, index: usize) -> Option<&Node> {
        self.levels.get(level).and_then(|nodes| nodes.get(index))
    }

    /// Generate the inclusion proof for leaf `index`.
    ///
    /// # Errors
    /// - `IndexOutOfRange` if `index >= leaf_count()`
    pub fn prove_inclusion(&self, index: usize) -> Result<Proof> {
        if index >= self.leaf_count() {
            return Err(MerkleError::IndexOutOfRange {
                index,
                total: self.leaf_count(),
            });
        }

        let proof = self.path_for(index);
        trace!("Generated proof for leaf {}: {} steps", index, proof.len());
        Ok(proof)
    }

    /// One proof per leaf, in leaf order.
    pub fn prove_all(&self) -> Vec<Proof> {
        (0..self.leaf_count()).map(|i| self.path_for(i)).collect()
    }

    // `index` must be a valid leaf position
    fn path_for(&self, index: usize) -> Proof {
        let mut steps = Vec::with_capacity(self.height());
        let mut current = index;

        // the root level has no sibling
        for level in &self.levels[..self.height()] {
            let (left, right) = pair_at(level.len(), current / 2);
            let step = if current == left {
                ProofStep::new(*level[right].digest(), Side::Right)
            } else {
                ProofStep::new(*level[left].digest(), Side::Left)
            };
            steps.push(step);
            current /= 2;
        }

        Proof::from_steps(steps)
    }
}

/// ceil(log2(n)) for n >= 1
fn height_for(leaf_count: usize) -> usize {
    if leaf_count <= 1 {
        0
    } else {
        (usize::BITS - (leaf_count - 1).leading_zeros()) as usize
    }
}
