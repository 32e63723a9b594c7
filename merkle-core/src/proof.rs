//! Merkle inclusion proof
//!
//! A proof is the list of sibling digests met on the way from a leaf to the
//! root, one per level, each tagged with the side the sibling sits on.
//! `steps[0]` belongs to the leaf level; the root level contributes nothing.

use crate::digest::Digest;
use crate::verify;

/// Where the sibling sits relative to the node on the proof path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Sibling is on the left: parent = `H(sibling || current)`
    Left,
    /// Sibling is on the right: parent = `H(current || sibling)`
    Right,
}

impl Side {
    pub fn is_right(self) -> bool {
        self == Side::Right
    }

    pub fn flip(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// `true` means the sibling is on the right.
impl From<bool> for Side {
    fn from(is_right: bool) -> Self {
        if is_right {
            Side::Right
        } else {
            Side::Left
        }
    }
}

/// One level of a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofStep {
    pub sibling: Digest,
    pub side: Side,
}

impl ProofStep {
    pub fn new(sibling: Digest, side: Side) -> Self {
        Self { sibling, side }
    }
}

/// Inclusion proof for one leaf.
///
/// Proofs come from [`MerkleTree::prove_inclusion`](crate::MerkleTree::prove_inclusion)
/// or, for proofs received from elsewhere, [`Proof::from_steps`]. Nothing
/// about a proof is trusted: checking it is [`Proof::verify`].
///
/// # Example
///
/// ```
/// use merkle_core::{hash_node, Digest, Proof, ProofStep, Side};
///
/// let d0 = Digest::hash(b"tx0");
/// let d1 = Digest::hash(b"tx1");
/// let root = hash_node(&d0, &d1);
///
/// let proof = Proof::from_steps(vec![ProofStep::new(d0, Side::Left)]);
/// assert!(proof.verify(&d1, &root));
/// assert!(!proof.verify(&d0, &root));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Proof {
    steps: Vec<ProofStep>,
}

impl Proof {
    pub fn from_steps(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<ProofStep> {
        self.steps
    }

    /// Number of levels covered (tree height)
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Empty proofs belong to single-leaf trees
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProofStep> {
        self.steps.iter()
    }

    /// Root reached by folding `leaf` through every step.
    pub fn compute_root(&self, leaf: &Digest) -> Digest {
        verify::fold_root(leaf, &self.steps)
    }

    /// See [`verify`](crate::verify::verify).
    pub fn verify(&self, leaf: &Digest, claimed_root: &Digest) -> bool {
        verify::verify(leaf, self, claimed_root)
    }
}

impl From<Vec<ProofStep>> for Proof {
    fn from(steps: Vec<ProofStep>) -> Self {
        Self::from_steps(steps)
    }
}

impl<'a> IntoIterator for &'a Proof {
    type Item = &'a ProofStep;
    type IntoIter = std::slice::Iter<'a, ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
