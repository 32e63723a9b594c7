//! `merkle` subcommands
//!
//! Each command returns a report value; printing and exit codes are left to
//! `main`.

use std::path::{Path, PathBuf};

use merkle_core::{verify, Digest, MerkleTree};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::proof_file::ProofFile;
use crate::records::{leaf_digests, load_transactions, Transaction};

/// Output of `merkle root`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootReport {
    pub root: String,
    pub leaf_count: usize,
    pub height: usize,
}

/// Where `merkle verify` takes the leaf digest from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafSource {
    /// Digest given directly as hex
    Hex(String),
    /// Digest of record `index` in a transaction file
    Record { input: Option<PathBuf>, index: usize },
    /// `leaf` field of the proof file
    ProofFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyRequest {
    pub proof: PathBuf,
    /// Claimed root; falls back to the proof file's `root`
    pub root: Option<String>,
    pub leaf: LeafSource,
}

/// Output of `merkle verify`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub valid: bool,
    pub leaf: String,
    pub claimed_root: String,
    pub computed_root: String,
    pub steps: usize,
}

fn resolve_input(config: &CliConfig, input: Option<&Path>) -> Result<PathBuf> {
    input
        .map(Path::to_path_buf)
        .or_else(|| config.default_input.clone())
        .ok_or_else(|| {
            CliError::InvalidInput("no input file given and no default_input configured".to_string())
        })
}

/// Load the transaction file and build its tree.
pub fn build_tree(config: &CliConfig, input: Option<&Path>) -> Result<(Vec<Transaction>, MerkleTree)> {
    let path = resolve_input(config, input)?;
    let transactions = load_transactions(&path, config.max_leaves)?;
    let tree = MerkleTree::build(leaf_digests(&transactions))?;
    info!(
        "Built tree over {} transactions from {}",
        tree.leaf_count(),
        path.display()
    );
    Ok((transactions, tree))
}

/// `merkle root`
pub fn root(config: &CliConfig, input: Option<&Path>) -> Result<RootReport> {
    let (_, tree) = build_tree(config, input)?;
    Ok(RootReport {
        root: tree.root_hex(),
        leaf_count: tree.leaf_count(),
        height: tree.height(),
    })
}

/// `merkle prove`
pub fn prove(config: &CliConfig, input: Option<&Path>, index: usize) -> Result<ProofFile> {
    let (transactions, tree) = build_tree(config, input)?;
    let proof = tree.prove_inclusion(index)?;
    let leaf = transactions[index].digest();

    info!(
        "Proof for transaction #{} ({}): {} steps",
        index,
        transactions[index].id,
        proof.len()
    );
    Ok(ProofFile::new(index, &leaf, &tree.root_digest(), &proof))
}

/// `merkle verify`
///
/// An invalid proof is a normal outcome (`valid: false`), not an error.
/// Errors are reserved for unreadable files and malformed digests.
pub fn verify_proof(config: &CliConfig, request: &VerifyRequest) -> Result<VerifyReport> {
    let file = ProofFile::load(&request.proof)?;
    let proof = file.to_proof()?;

    let claimed_root = match &request.root {
        Some(hex) => Digest::from_hex(hex)?,
        None => file.root_digest()?.ok_or_else(|| {
            CliError::InvalidInput("no --root given and proof file has no root".to_string())
        })?,
    };

    let leaf = match &request.leaf {
        LeafSource::Hex(hex) => Digest::from_hex(hex)?,
        LeafSource::Record { input, index } => {
            let path = resolve_input(config, input.as_deref())?;
            let transactions = load_transactions(&path, config.max_leaves)?;
            transactions
                .get(*index)
                .map(Transaction::digest)
                .ok_or_else(|| {
                    CliError::InvalidInput(format!(
                        "record index {} out of range ({} records)",
                        index,
                        transactions.len()
                    ))
                })?
        }
        LeafSource::ProofFile => file.leaf_digest()?.ok_or_else(|| {
            CliError::InvalidInput("no leaf given and proof file has no leaf".to_string())
        })?,
    };

    let valid = verify(&leaf, &proof, &claimed_root);
    let computed_root = proof.compute_root(&leaf);
    if valid {
        debug!("Proof valid for leaf {}", leaf);
    } else {
        warn!(
            "Proof INVALID: computed root {} != claimed root {}",
            computed_root, claimed_root
        );
    }

    Ok(VerifyReport {
        valid,
        leaf: leaf.to_hex(),
        claimed_root: claimed_root.to_hex(),
        computed_root: computed_root.to_hex(),
        steps: proof.len(),
    })
}

/// Serialize a report honoring `pretty_json`
pub fn to_json<T: Serialize>(config: &CliConfig, value: &T) -> Result<String> {
    let json = if config.pretty_json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
