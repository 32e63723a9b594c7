//! Merkle tool main program
//!
//! 1. Load configuration
//! 2. Initialize logging
//! 3. Run the requested command (root / prove / verify)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use merkle_cli::commands::{self, LeafSource, VerifyRequest};
use merkle_cli::config::{self, CliConfig};

/// Merkle root and inclusion proof tool for transaction batches
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error), overrides config file
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the Merkle root of a transaction file
    Root {
        /// Transaction file (JSON array)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Generate the inclusion proof of one transaction
    Prove {
        /// Transaction file (JSON array)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Position of the transaction in the file
        #[arg(short = 'n', long)]
        index: usize,

        /// Write the proof here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check an inclusion proof; exits with status 1 if it does not hold
    Verify {
        /// Proof file produced by `prove`
        #[arg(short, long)]
        proof: PathBuf,

        /// Claimed root (hex), defaults to the root stored in the proof file
        #[arg(short, long)]
        root: Option<String>,

        /// Leaf digest (hex)
        #[arg(long, conflicts_with = "index")]
        leaf: Option<String>,

        /// Hash transaction #INDEX of the input file as the leaf
        #[arg(short = 'n', long)]
        index: Option<usize>,

        /// Transaction file used with --index
        #[arg(short, long, requires = "index")]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load configuration
    let mut config = load_configuration(args.config.as_deref())?;
    if let Some(level) = args.log_level {
        config.log_level = level;
    }

    // 2. Initialize logging
    init_logging(&config.log_level)?;
    info!("Merkle tool v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = args.config.as_deref().filter(|p| !p.exists()) {
        warn!("Configuration file {} does not exist, using defaults", path.display());
    }

    // 3. Run command
    match args.command {
        Command::Root { input } => {
            let report = commands::root(&config, input.as_deref())
                .context("Failed to compute Merkle root")?;
            println!("{}", commands::to_json(&config, &report)?);
        }
        Command::Prove {
            input,
            index,
            output,
        } => {
            let proof = commands::prove(&config, input.as_deref(), index)
                .with_context(|| format!("Failed to generate proof for transaction #{}", index))?;
            let json = proof.to_json(config.pretty_json)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Proof written to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Command::Verify {
            proof,
            root,
            leaf,
            index,
            input,
        } => {
            let leaf = match (leaf, index) {
                (Some(hex), _) => LeafSource::Hex(hex),
                (None, Some(index)) => LeafSource::Record { input, index },
                (None, None) => LeafSource::ProofFile,
            };
            let request = VerifyRequest { proof, root, leaf };

            let report =
                commands::verify_proof(&config, &request).context("Failed to verify proof")?;
            println!("{}", commands::to_json(&config, &report)?);

            if !report.valid {
                error!("Proof does NOT verify against the claimed root");
                std::process::exit(1);
            }
            info!("Proof is valid");
        }
    }

    Ok(())
}

/// Initialize logging system
fn init_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => {
            eprintln!("Unknown log level: {}, using INFO", log_level);
            tracing::Level::INFO
        }
    };

    // stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

/// Load configuration file, environment, or defaults
fn load_configuration(config_path: Option<&Path>) -> Result<CliConfig> {
    match config_path {
        Some(path) if path.exists() => {
            config::load_config(path).context("Failed to load configuration")
        }
        // reported once logging is up
        Some(_) => Ok(CliConfig::default()),
        None => config::load_config_from_env().context("Failed to load configuration from environment"),
    }
}
