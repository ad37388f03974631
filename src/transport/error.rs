//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Raised when no HTTP response exists at all. The dispatcher hands these
/// back to its caller unchanged.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error raised while consuming a response body.
#[derive(Debug, Error)]
pub enum BodyError {
    /// The body stream failed before it was fully read.
    #[error("Failed to read response body: {0}")]
    Read(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl BodyError {
    /// Creates a read error carrying a plain message.
    #[must_use]
    pub fn read(reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        Self::Read(reason.into())
    }
}
