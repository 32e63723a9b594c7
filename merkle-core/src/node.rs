//! Tree nodes and the level pairing rule
//!
//! Each level of a tree is one contiguous `Vec<Node>`. An internal node
//! names its two children by position in the level below. When a level has
//! an odd number of nodes (and more than one), its last node is paired with
//! itself, so the parent's `left` and `right` are the same position and the
//! same digest is hashed twice. No node is ever copied for padding.
//!
//! [`pair_at`] is the only place that decides which positions pair up.
//! Construction ([`pair_level`]) and proof generation both call it.

use crate::digest::{hash_node, Digest};

/// A node of the tree: a wrapped leaf digest, or the hash of two children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Record digest, stored without re-hashing
    Leaf(Digest),

    /// `digest = H(level_below[left] || level_below[right])`
    Internal {
        left: usize,
        right: usize,
        digest: Digest,
    },
}

impl Node {
    pub fn digest(&self) -> &Digest {
        match self {
            Node::Leaf(digest) => digest,
            Node::Internal { digest, .. } => digest,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Child positions in the level below, `None` for leaves
    pub fn children(&self) -> Option<(usize, usize)> {
        match self {
            Node::Leaf(_) => None,
            Node::Internal { left, right, .. } => Some((*left, *right)),
        }
    }
}

/// Number of parents produced from a level of `len` nodes.
pub(crate) fn parent_count(len: usize) -> usize {
    len.div_ceil(2)
}

/// Child positions of parent `parent` in a level of `len` nodes.
///
/// The last parent of an odd-length level gets the final node twice.
pub(crate) fn pair_at(len: usize, parent: usize) -> (usize, usize) {
    let left = parent * 2;
    let right = if left + 1 < len { left + 1 } else { left };
    (left, right)
}

#[cfg(feature = "parallel")]
const PARALLEL_MIN_PARENTS: usize = 1024;

fn parent_of(level: &[Node], parent: usize) -> Node {
    let (left, right) = pair_at(level.len(), parent);
    Node::Internal {
        left,
        right,
        digest: hash_node(level[left].digest(), level[right].digest()),
    }
}

/// Build the next level up. `level` must hold at least two nodes.
#[cfg(not(feature = "parallel"))]
pub(crate) fn pair_level(level: &[Node]) -> Vec<Node> {
    (0..parent_count(level.len()))
        .map(|parent| parent_of(level, parent))
        .collect()
}

/// Build the next level up. `level` must hold at least two nodes.
///
/// Wide levels are hashed on the rayon pool; sibling subtrees are
/// independent so the output is identical to the sequential path.
#[cfg(feature = "parallel")]
pub(crate) fn pair_level(level: &[Node]) -> Vec<Node> {
    use rayon::prelude::*;

    let parents = parent_count(level.len());
    if parents >= PARALLEL_MIN_PARENTS {
        (0..parents)
            .into_par_iter()
            .map(|parent| parent_of(level, parent))
            .collect()
    } else {
        (0..parents).map(|parent| parent_of(level, parent)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(n: u8) -> Vec<Node> {
        (0..n).map(|i| Node::Leaf(Digest::new([i; 32]))).collect()
    }

    #[test]
    fn test_pair_at_even_level() {
        assert_eq!(pair_at(4, 0), (0, 1));
        assert_eq!(pair_at(4, 1), (2, 3));
    }

    #[test]
    fn test_pair_at_odd_level_duplicates_last() {
        assert_eq!(pair_at(3, 0), (0, 1));
        assert_eq!(pair_at(3, 1), (2, 2));
        assert_eq!(pair_at(5, 2), (4, 4));
    }

    #[test]
    fn test_parent_count() {
        assert_eq!(parent_count(2), 1);
        assert_eq!(parent_count(3), 2);
        assert_eq!(parent_count(4), 2);
        assert_eq!(parent_count(7), 4);
    }

    #[test]
    fn test_pair_level_self_pairs_last_node() {
        let level = leaves(3);
        let next = pair_level(&level);

        assert_eq!(next.len(), 2);
        assert_eq!(next[1].children(), Some((2, 2)));
        assert_eq!(
            *next[1].digest(),
            hash_node(level[2].digest(), level[2].digest())
        );
    }

    #[test]
    fn test_leaf_node_accessors() {
        let d = Digest::new([9; 32]);
        let node = Node::Leaf(d);
        assert!(node.is_leaf());
        assert_eq!(node.children(), None);
        assert_eq!(*node.digest(), d);
    }
}
