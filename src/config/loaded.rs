//! Loading the configuration file and remembering where it came from.

use std::fmt;
use std::path::{Path, PathBuf};

use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Configuration as loaded for one invocation.
///
/// Passed by reference to whatever needs it; nothing is stored globally.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    /// File the configuration was read from, `None` if no file was used
    pub path: Option<PathBuf>,

    /// Parsed contents (empty when no file was used)
    pub toml: TomlConfig,
}

impl fmt::Display for LoadedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "config file '{}'", path.display()),
            None => write!(f, "no config file"),
        }
    }
}

impl LoadedConfig {
    /// Wraps an already-parsed config, e.g. in tests.
    #[must_use]
    pub const fn new(path: Option<PathBuf>, toml: TomlConfig) -> Self {
        Self { path, toml }
    }

    /// Loads the configuration file.
    ///
    /// An explicit path must be readable. Without one, the default file in
    /// the working directory is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file cannot be read, or if any file
    /// that was found fails to parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let path = expand_tilde(path);
            let toml = TomlConfig::load(&path)?;
            tracing::debug!("Using config file: {}", path.display());
            return Ok(Self::new(Some(path), toml));
        }

        let path = PathBuf::from(defaults::CONFIG_FILE);
        if !path.is_file() {
            tracing::debug!("No config file at {}, continuing without one", path.display());
            return Ok(Self::default());
        }

        let toml = TomlConfig::load(&path)?;
        tracing::debug!("Using config file: {}", path.display());
        Ok(Self::new(Some(path), toml))
    }

    /// Returns the configured cluster aliases, sorted by name.
    pub fn clusters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.toml
            .clusters
            .iter()
            .map(|(name, address)| (name.as_str(), address.as_str()))
    }
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
