//! Error types for allocation exclusion management.

use thiserror::Error;

use crate::transport::TransportError;

/// A delta entry that is not an IPv4 or IPv6 literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{value} is invalid ip addr")]
pub struct InvalidIpError {
    /// The offending entry, trimmed
    pub value: String,
}

/// The rendered settings document failed its self-check.
///
/// Indicates a defect in the payload template, not bad user input.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Template rendering failed.
    #[error("Failed to render settings payload: {0}")]
    Render(String),

    /// The rendered text is not valid JSON.
    #[error("Rendered settings payload is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The rendered document lacks the expected value at `key`.
    #[error("Rendered settings payload has an unexpected value for '{key}'")]
    Mismatch {
        /// The settings key that did not match
        key: &'static str,
    },
}

/// Error type for an exclude/include run.
///
/// Input and payload errors are raised before the write is attempted.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// A delta entry is not an IP literal.
    #[error(transparent)]
    InvalidIp(#[from] InvalidIpError),

    /// The settings payload failed its self-check.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reading or writing the cluster settings failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
