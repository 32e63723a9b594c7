//! Proof verification
//!
//! Verification steps:
//! 1. `current = leaf`
//! 2. for every step, leaf level first:
//!    - sibling on the right: `current = H(current || sibling)`
//!    - sibling on the left: `current = H(sibling || current)`
//! 3. accept iff `current == claimed_root`
//!
//! The leaf, the proof and the root may all come from an untrusted peer.
//! Verification is a total function over them: every input maps to a
//! boolean, with one hash per step and no indexing into caller data.

use crate::digest::{hash_node, Digest};
use crate::proof::{Proof, ProofStep, Side};

/// Check that `leaf` is committed to by `claimed_root` through `proof`.
///
/// # Example
///
/// ```
/// use merkle_core::{verify, Digest, MerkleTree};
///
/// let leaves: Vec<Digest> = (0..5u8).map(|i| Digest::hash(&[i])).collect();
/// let tree = MerkleTree::build(leaves.iter().copied()).unwrap();
///
/// let proof = tree.prove_inclusion(3).unwrap();
/// assert!(verify(&leaves[3], &proof, &tree.root_digest()));
/// assert!(!verify(&leaves[2], &proof, &tree.root_digest()));
/// ```
pub fn verify(leaf: &Digest, proof: &Proof, claimed_root: &Digest) -> bool {
    fold_root(leaf, proof.steps()) == *claimed_root
}

pub(crate) fn fold_root(leaf: &Digest, steps: &[ProofStep]) -> Digest {
    steps.iter().fold(*leaf, |current, step| match step.side {
        Side::Right => hash_node(&current, &step.sibling),
        Side::Left => hash_node(&step.sibling, &current),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_leaf_empty_proof() {
        let leaf = Digest::hash(b"single leaf");
        assert!(verify(&leaf, &Proof::default(), &leaf));
        assert!(!verify(&Digest::hash(b"wrong"), &Proof::default(), &leaf));
    }

    #[test]
    fn test_two_leaf_tree() {
        let h0 = Digest::hash(b"leaf 0");
        let h1 = Digest::hash(b"leaf 1");
        let root = hash_node(&h0, &h1);

        let proof0 = Proof::from_steps(vec![ProofStep::new(h1, Side::Right)]);
        let proof1 = Proof::from_steps(vec![ProofStep::new(h0, Side::Left)]);

        assert!(verify(&h0, &proof0, &root));
        assert!(verify(&h1, &proof1, &root));
        assert!(!verify(&h1, &proof0, &root));
    }

    #[test]
    fn test_wrong_side_fails() {
        let h0 = Digest::hash(b"leaf 0");
        let h1 = Digest::hash(b"leaf 1");
        let root = hash_node(&h0, &h1);

        // correct sibling, wrong position
        let bad = Proof::from_steps(vec![ProofStep::new(h1, Side::Left)]);
        assert!(!verify(&h0, &bad, &root));
    }

    #[test]
    fn test_too_short_and_too_long_proofs_fail() {
        let leaves: Vec<Digest> = (0..4u8).map(|i| Digest::hash(&[i])).collect();
        let n01 = hash_node(&leaves[0], &leaves[1]);
        let n23 = hash_node(&leaves[2], &leaves[3]);
        let root = hash_node(&n01, &n23);

        let full = vec![
            ProofStep::new(leaves[1], Side::Right),
            ProofStep::new(n23, Side::Right),
        ];
        assert!(verify(&leaves[0], &Proof::from_steps(full.clone()), &root));

        let short = Proof::from_steps(full[..1].to_vec());
        assert!(!verify(&leaves[0], &short, &root));

        let mut long = full;
        long.push(ProofStep::new(root, Side::Left));
        assert!(!verify(&leaves[0], &Proof::from_steps(long), &root));
    }

    #[test]
    fn test_garbage_proof_never_panics() {
        let leaf = Digest::new([0xFF; 32]);
        let root = Digest::new([0x00; 32]);
        let steps = (0..512u32)
            .map(|i| {
                let mut bytes = [0u8; 32];
                bytes[..4].copy_from_slice(&i.to_le_bytes());
                ProofStep::new(Digest::new(bytes), Side::from(i % 3 == 0))
            })
            .collect();

        assert!(!verify(&leaf, &Proof::from_steps(steps), &root));
    }
}
