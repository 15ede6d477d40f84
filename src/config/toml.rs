//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// Every field is optional so that an empty file is a valid config.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Cluster alias to address mapping, e.g. `logs = "10.1.0.5:9200"`
    #[serde(default)]
    pub clusters: BTreeMap<String, String>,

    /// File that mutating commands append an operation record to
    pub audit_log: Option<PathBuf>,

    /// Default basic auth credentials (`user:pass`), overridden by `--http-auth`
    pub http_auth: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// Looks up the address configured for a cluster alias.
    #[must_use]
    pub fn cluster_address(&self, name: &str) -> Option<&str> {
        self.clusters.get(name).map(String::as_str)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# elastic-trib configuration file

# Basic auth credentials used when --http-auth is not given.
# http_auth = "elastic:changeme"

# Append a record of every mutating command (exclude, include, settings --set)
# audit_log = "elastic-trib-audit.log"

# Cluster aliases used with `--cluster <name>`.
# Addresses without a scheme get http:// prepended.
[clusters]
# local = "127.0.0.1:9200"
# logs = "http://10.1.0.5:9200"
"#
    .to_string()
}
