//! Configuration management
//!
//! Loads and validates the `merkle` tool configuration

use crate::error::{CliError, Result};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Log levels accepted by `--log-level` and `log_level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Runtime configuration of the `merkle` tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Record file used when a command gets no `--input`
    pub default_input: Option<PathBuf>,

    /// Pretty-print JSON output
    pub pretty_json: bool,

    /// Upper bound on records accepted from one input file
    pub max_leaves: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: std::env::var("MERKLE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            default_input: None,
            pretty_json: true,
            max_leaves: std::env::var("MERKLE_MAX_LEAVES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1_000_000),
        }
    }
}

/// Load the configuration from a file
///
/// # Parameters
/// - `config_path`: configuration file (TOML, JSON or YAML)
///
/// # Returns
/// - `Ok(CliConfig)`: loaded and validated configuration
/// - `Err(CliError::Config)`: unreadable file or invalid values
///
/// # Example
/// ```no_run
/// use merkle_cli::config::load_config;
///
/// let config = load_config("merkle.toml").expect("Failed to load config");
/// println!("Max leaves: {}", config.max_leaves);
/// ```
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<CliConfig> {
    let config = Config::builder()
        .add_source(File::from(config_path.as_ref()))
        .build()
        .map_err(|e| CliError::Config(format!("Failed to load config file: {}", e)))?;

    let cli_config: CliConfig = config
        .try_deserialize()
        .map_err(|e| CliError::Config(format!("Failed to parse config: {}", e)))?;

    validate_config(&cli_config)?;

    Ok(cli_config)
}

/// Load the configuration from environment variables
///
/// Prefix: `MERKLE_`
/// Example: `MERKLE_LOG_LEVEL`, `MERKLE_MAX_LEAVES`
pub fn load_config_from_env() -> Result<CliConfig> {
    let config = Config::builder()
        .add_source(config::Environment::with_prefix("MERKLE"))
        .build()
        .map_err(|e| CliError::Config(format!("Failed to load env vars: {}", e)))?;

    let cli_config: CliConfig = config
        .try_deserialize()
        .map_err(|e| CliError::Config(format!("Failed to parse env config: {}", e)))?;

    validate_config(&cli_config)?;

    Ok(cli_config)
}

/// Check configuration values
///
/// Checks:
/// - the log level is one of [`LOG_LEVELS`]
/// - `max_leaves` is not zero
pub fn validate_config(config: &CliConfig) -> Result<()> {
    if !LOG_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
        return Err(CliError::Config(format!(
            "Unknown log level: {}",
            config.log_level
        )));
    }

    if config.max_leaves == 0 {
        return Err(CliError::Config(
            "max_leaves must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
