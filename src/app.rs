//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use elastic_trib::commands::{CommandError, FailureKind};
use elastic_trib::config::{ConfigError, LogFormat};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    use super::{CommandError, FailureKind};

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration or input error (exit code 1): bad config, missing arguments, invalid IP.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2): network failure, API error, audit log failure.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// Picks the exit code for a failed command.
    pub fn for_error(error: &CommandError) -> ExitCode {
        match error.kind() {
            FailureKind::Input => CONFIG_ERROR,
            FailureKind::Runtime => runtime_error(),
        }
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'elastic-trib init' to generate a configuration template.");
        }
        ConfigError::UnknownCluster { .. } => {
            eprintln!("\nRun 'elastic-trib cluster list' to show the configured clusters.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Log lines go to stderr; stdout carries command output only.
pub fn setup_tracing(verbose: bool, format: LogFormat) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
