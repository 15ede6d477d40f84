//! Error types for command execution.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::allocation::{AllocationError, InvalidIpError, ValidationError};
use crate::audit::AuditError;
use crate::config::ConfigError;
use crate::transport::TransportError;

use super::Resource;

/// A command was invoked with missing or unusable arguments.
#[derive(Debug, Error)]
pub enum UsageError {
    /// `nodes exclude` / `nodes include` without an IP list.
    #[error("Must provide ip addrs for {command} command. (Example: ip1,ip2)")]
    MissingIpList {
        /// The command name
        command: &'static str,
    },

    /// An index or template command without names.
    #[error("Must provide index names for {command} command. (Example: index1,index2)")]
    MissingTargets {
        /// The command name
        command: &'static str,
    },

    /// A name list entry that would address another endpoint.
    #[error("Invalid index name '{target}'")]
    InvalidTarget {
        /// The rejected entry
        target: String,
    },

    /// A command that acts on one name was given several.
    #[error("{command} takes exactly one name")]
    SingleTarget {
        /// The command name
        command: &'static str,
    },

    /// Neither a read nor a write was requested.
    #[error("{command} must be given {options}")]
    MissingAction {
        /// The command name
        command: &'static str,
        /// The accepted options
        options: &'static str,
    },

    /// A task id not of the form `<node>:<number>`.
    #[error("Invalid task id '{id}' (expected node_id:task_number)")]
    InvalidTaskId {
        /// The rejected id
        id: String,
    },

    /// The operator did not confirm a destructive command.
    #[error("*** Aborting {command}")]
    Aborted {
        /// The command name
        command: &'static str,
    },

    /// No catalog entry for a read-only command.
    #[error("No '{verb}' command for {resource}")]
    UnknownCommand {
        /// The resource named on the command line
        resource: Resource,
        /// The verb that was not found
        verb: String,
    },

    /// The settings document is not a JSON object.
    #[error("Settings must be a JSON object: {reason}")]
    NotJsonObject {
        /// What was wrong with the input
        reason: String,
    },

    /// The settings file could not be read.
    #[error("Failed to read settings from '{path}': {source}")]
    SettingsFile {
        /// Path given with `--file` (`-` for stdin)
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// How a failed command should be reported to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Bad configuration or input; nothing was sent to the cluster.
    Input,
    /// The command failed while running.
    Runtime,
}

/// Any error a command can end with.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    InvalidIp(#[from] InvalidIpError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl From<AllocationError> for CommandError {
    fn from(error: AllocationError) -> Self {
        match error {
            AllocationError::InvalidIp(e) => Self::InvalidIp(e),
            AllocationError::Validation(e) => Self::Validation(e),
            AllocationError::Transport(e) => Self::Transport(e),
        }
    }
}

impl CommandError {
    /// Classifies the error for exit-code selection.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Config(_) | Self::Usage(_) | Self::InvalidIp(_) => FailureKind::Input,
            Self::Validation(_) | Self::Transport(_) | Self::Audit(_) => FailureKind::Runtime,
        }
    }
}
