//! Error types for configuration loading and target resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Every variant is raised before any request reaches the cluster.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A cluster alias was requested but the config has no entry for it.
    #[error("Unknown cluster name '{name}' in config ({source_name})")]
    UnknownCluster {
        /// The alias passed via `--cluster`
        name: String,
        /// Description of the config source that was consulted
        source_name: String,
    },

    /// The resolved address is not a usable base URL.
    #[error("Invalid cluster address '{address}': {reason}")]
    InvalidAddress {
        /// The address as given
        address: String,
        /// Reason for invalidity
        reason: String,
    },
}
