//! Append-only record of mutating commands.
//!
//! When an audit file is configured, every command that writes cluster
//! settings appends one line before the write is issued:
//!
//! ```text
//! <unix-secs> <user> <command line>
//! ```

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileAuditLog;

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::SystemTime;

use thiserror::Error;

/// User name recorded when neither `USER` nor `USERNAME` is set.
const UNKNOWN_USER: &str = "unknown";

/// One audited invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    /// Seconds since the Unix epoch
    pub timestamp: u64,
    /// Login name of the invoking user
    pub user: String,
    /// The command line as typed
    pub command_line: String,
}

impl OperationRecord {
    /// Creates a record for `command_line`, stamped now, for the current user.
    #[must_use]
    pub fn now(command_line: impl Into<String>) -> Self {
        Self {
            timestamp: unix_timestamp_now(),
            user: current_user(),
            command_line: command_line.into(),
        }
    }
}

impl fmt::Display for OperationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.timestamp, self.user, self.command_line)
    }
}

/// Errors raised while appending to the audit log.
///
/// Any of these aborts the command before the cluster is touched.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The audit file could not be opened or created.
    #[error("Failed to open audit log '{path}': {source}")]
    Open {
        /// Path of the audit file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The record could not be written.
    #[error("Failed to write audit log '{path}': {source}")]
    Write {
        /// Path of the audit file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The blocking writer task did not complete.
    #[error("Audit log writer did not complete: {0}")]
    Interrupted(String),
}

fn unix_timestamp_now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn current_user() -> String {
    ["USER", "USERNAME"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_USER.to_string())
}
