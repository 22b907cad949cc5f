//! Error Types
//!
//! Crate-level error taxonomy for the PM Buddy client. The dispatcher
//! classifies every failed call into one of these categories; only
//! transient failures (network errors, 5xx, 429) are retried.

use thiserror::Error;

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the PM Buddy client.
#[derive(Debug, Error)]
pub enum Error {
    /// The backend rejected our credentials or token (401/403).
    #[error("Authentication failed (status {status}): {message}")]
    AuthFailed { status: u16, message: String },

    /// The backend rejected the request as malformed (400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out. Please try again.")]
    Timeout,

    /// The request never reached the backend.
    #[error("Network error: {0}")]
    Network(String),

    /// Any other non-success response from the backend.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Session storage failure.
    #[error(transparent)]
    Session(#[from] crate::session::SessionError),

    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Payload could not be encoded or a response could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the dispatcher may retry after this error.
    ///
    /// Auth failures (401/403), malformed requests (400), and timeouts
    /// are never retried; those statuses are classified into their own
    /// variants before a response ever becomes `Api`. Everything else —
    /// network failures and any remaining non-success status — is
    /// retried up to the ceiling.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Api { .. })
    }
}
