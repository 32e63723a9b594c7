//! `merkle` command line tool
//!
//! Commits a JSON file of transactions to a Merkle root and produces and
//! checks inclusion proofs for individual transactions.
//!
//! # Architecture
//!
//! ```text
//!   records.json ──► records ──► merkle_core::MerkleTree ──► root
//!                                        │
//!                                        ▼
//!                                   proof_file ──► verify
//! ```
//!
//! # Example
//!
//! ```no_run
//! use merkle_cli::{commands, config::load_config};
//! use std::path::Path;
//!
//! let config = load_config("merkle.toml")?;
//! let report = commands::root(&config, Some(Path::new("transactions.json")))?;
//! println!("Merkle root: {}", report.root);
//! # Ok::<(), merkle_cli::CliError>(())
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod proof_file;
pub mod records;

// Re-export commonly used types
pub use config::CliConfig;
pub use error::{CliError, Result};
pub use proof_file::ProofFile;
pub use records::Transaction;
