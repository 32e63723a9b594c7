//! Proof files written by `merkle prove` and read by `merkle verify`
//!
//! Digests are hex strings so the files stay readable:
//!
//! ```json
//! {
//!   "leaf_index": 1,
//!   "leaf": "9f86...",
//!   "root": "3a7b...",
//!   "steps": [
//!     { "sibling": "e3b0...", "side": "left" },
//!     { "sibling": "5e88...", "side": "right" }
//!   ]
//! }
//! ```
//!
//! Nothing read from a proof file is trusted; it is only parsed into core
//! types and handed to the verifier.

use std::path::Path;

use merkle_core::{Digest, Proof, ProofStep, Side};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepSide {
    Left,
    Right,
}

impl From<Side> for StepSide {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => StepSide::Left,
            Side::Right => StepSide::Right,
        }
    }
}

impl From<StepSide> for Side {
    fn from(side: StepSide) -> Self {
        match side {
            StepSide::Left => Side::Left,
            StepSide::Right => Side::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEntry {
    pub sibling: String,
    pub side: StepSide,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofFile {
    /// Position of the proven leaf, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaf_index: Option<u64>,

    /// Leaf digest the proof was generated for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaf: Option<String>,

    /// Root the proof was generated against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    pub steps: Vec<StepEntry>,
}

impl ProofFile {
    pub fn new(leaf_index: usize, leaf: &Digest, root: &Digest, proof: &Proof) -> Self {
        Self {
            leaf_index: Some(leaf_index as u64),
            leaf: Some(leaf.to_hex()),
            root: Some(root.to_hex()),
            steps: proof
                .iter()
                .map(|step| StepEntry {
                    sibling: step.sibling.to_hex(),
                    side: step.side.into(),
                })
                .collect(),
        }
    }

    /// Parse the steps into a core proof.
    ///
    /// # Errors
    /// - `Merkle(InvalidDigest)` if any sibling is not a 32-byte hex digest
    pub fn to_proof(&self) -> Result<Proof> {
        let steps = self
            .steps
            .iter()
            .map(|entry| -> Result<ProofStep> {
                let sibling = Digest::from_hex(&entry.sibling)?;
                Ok(ProofStep::new(sibling, entry.side.into()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Proof::from_steps(steps))
    }

    pub fn leaf_digest(&self) -> Result<Option<Digest>> {
        Ok(self.leaf.as_deref().map(Digest::from_hex).transpose()?)
    }

    pub fn root_digest(&self) -> Result<Option<Digest>> {
        Ok(self.root.as_deref().map(Digest::from_hex).transpose()?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use merkle_core::{MerkleError, MerkleTree};

    fn sample_tree() -> (Vec<Digest>, MerkleTree) {
        let leaves: Vec<Digest> = (0..5u8).map(|i| Digest::hash(&[i])).collect();
        let tree = MerkleTree::build(leaves.clone()).unwrap();
        (leaves, tree)
    }

    #[test]
    fn test_proof_survives_file_form() {
        let (leaves, tree) = sample_tree();
        let proof = tree.prove_inclusion(3).unwrap();
        let file = ProofFile::new(3, &leaves[3], &tree.root_digest(), &proof);

        let json = file.to_json(false).unwrap();
        let parsed: ProofFile = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.to_proof().unwrap(), proof);
        assert_eq!(parsed.leaf_digest().unwrap(), Some(leaves[3]));
        assert_eq!(parsed.root_digest().unwrap(), Some(tree.root_digest()));
    }

    #[test]
    fn test_side_is_lowercase_text() {
        let (leaves, tree) = sample_tree();
        let proof = tree.prove_inclusion(1).unwrap();
        let json = ProofFile::new(1, &leaves[1], &tree.root_digest(), &proof)
            .to_json(false)
            .unwrap();

        assert!(json.contains("\"side\":\"left\""));
    }

    #[test]
    fn test_minimal_file_has_only_steps() {
        let json = r#"{ "steps": [] }"#;
        let file: ProofFile = serde_json::from_str(json).unwrap();

        assert!(file.to_proof().unwrap().is_empty());
        assert_eq!(file.leaf_digest().unwrap(), None);
        assert_eq!(file.root_digest().unwrap(), None);
    }

    #[test]
    fn test_bad_sibling_hex() {
        let json = r#"{ "steps": [ { "sibling": "beef", "side": "right" } ] }"#;
        let file: ProofFile = serde_json::from_str(json).unwrap();

        assert!(matches!(
            file.to_proof(),
            Err(CliError::Merkle(MerkleError::InvalidDigest(_)))
        ));
    }

    #[test]
    fn test_unknown_side_rejected() {
        let json = r#"{ "steps": [ { "sibling": "00", "side": "up" } ] }"#;
        assert!(serde_json::from_str::<ProofFile>(json).is_err());
    }
}
