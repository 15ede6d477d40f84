//! Default values for configuration options.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

/// Address used when neither `--host` nor `--cluster` is given.
pub const ADDRESS: &str = "http://127.0.0.1:9200";

/// Scheme prepended to addresses that do not carry one.
pub const SCHEME: &str = "http";

/// Configuration file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE: &str = "elastic-trib.toml";
