//! # Node Configuration
//!
//! Where the ledger file lives and how verbosely the node logs.
//!
//! Values are layered: built-in defaults, then `PC_DATA_DIR`,
//! `PC_STORE_FILE` and `PC_LOG` from the environment, then command-line
//! flags (applied by the binary).

use std::path::PathBuf;
use thiserror::Error;

/// Environment variable overriding [`NodeConfig::data_dir`].
pub const ENV_DATA_DIR: &str = "PC_DATA_DIR";
/// Environment variable overriding [`NodeConfig::store_file`].
pub const ENV_STORE_FILE: &str = "PC_STORE_FILE";
/// Environment variable overriding [`NodeConfig::log_filter`].
pub const ENV_LOG: &str = "PC_LOG";

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// Directory holding the ledger file. Created on first write.
    pub data_dir: PathBuf,
    /// Ledger file name inside `data_dir`.
    pub store_file: String,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            store_file: "provenance.ledger".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl NodeConfig {
    /// Full path of the ledger file.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup(ENV_STORE_FILE) {
            self.store_file = file;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }
        self
    }

    /// Reject configurations that cannot name a ledger file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }
        if self.store_file.is_empty() {
            return Err(ConfigError::EmptyStoreFile);
        }
        if self.store_file.contains(['/', '\\']) {
            return Err(ConfigError::StoreFileNotBareName {
                name: self.store_file.clone(),
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::EmptyLogFilter);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("data directory must not be empty (set PC_DATA_DIR or --data-dir)")]
    EmptyDataDir,
    #[error("store file name must not be empty (set PC_STORE_FILE or --store-file)")]
    EmptyStoreFile,
    #[error("store file {name:?} must be a bare file name; put directories in the data dir")]
    StoreFileNotBareName { name: String },
    #[error("log filter must not be empty (set PC_LOG or --log-level)")]
    EmptyLogFilter,
}

/// Defaults overlaid with the process environment.
pub fn load_config() -> NodeConfig {
    let config = NodeConfig::default().with_env_overrides(|name| std::env::var(name).ok());
    tracing::debug!("Loaded node config: {:?}", config);
    config
}
