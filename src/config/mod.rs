//! Configuration layer for elastic-trib.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - The per-invocation loaded configuration ([`LoadedConfig`])
//! - Target resolution ([`resolve`], [`ConnectionTarget`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Config file
//!
//! `--config <path>` must point at a readable file. Without it,
//! `./elastic-trib.toml` is used when present; a missing default file is
//! not an error, the alias table is simply empty.
//!
//! Nothing here is stored in a global: the loaded config and the resolved
//! target are values handed to whoever needs them.

mod cli;
pub mod defaults;
mod error;
mod loaded;
mod resolver;
mod toml;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod toml_tests;

pub use cli::{
    Cli, ClusterCommand, Command, IndicesCommand, LogFormat, NodesCommand, OutputFormat,
    TasksCommand,
};
pub use error::ConfigError;
pub use loaded::{LoadedConfig, expand_tilde, write_default_config};
pub use resolver::{
    AuthWarning, ConnectionTarget, Credentials, Resolution, TargetSpec, parse_address, resolve,
};
pub use toml::{TomlConfig, default_config_template};
