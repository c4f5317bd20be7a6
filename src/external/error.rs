//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// The external IP fetcher folds these into its outcome: a client-side
/// timeout becomes `TimedOut`, everything else `NetworkError`.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out inside the HTTP client.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
