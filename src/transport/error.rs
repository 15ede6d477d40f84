//! Error types for HTTP and REST operations.

use thiserror::Error;

/// Error type for raw HTTP operations.
///
/// Describes what went wrong at the connection level, before any status
/// code is seen.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for a REST call against the cluster.
///
/// Any of these aborts the current command; nothing is retried.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be completed.
    #[error("{method} {url} failed: {source}")]
    Http {
        /// Request method
        method: http::Method,
        /// Request URL
        url: String,
        /// Underlying HTTP error
        #[source]
        source: HttpError,
    },

    /// The server answered with a non-2xx status.
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        /// Request method
        method: http::Method,
        /// Request URL
        url: String,
        /// Response status
        status: http::StatusCode,
        /// Response body (lossy UTF-8)
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        /// Request URL
        url: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The response decoded but a field had an unexpected shape.
    #[error("Unexpected response from {url}: {reason}")]
    Schema {
        /// Request URL
        url: String,
        /// What was wrong
        reason: String,
    },

    /// An API path could not be joined onto the cluster address.
    #[error("Invalid API path '{path}': {reason}")]
    InvalidPath {
        /// The relative path
        path: String,
        /// Reason for invalidity
        reason: String,
    },
}
