//! Error types for the runtime.

use thiserror::Error;

/// Result alias for network calls.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// A failed network call. These never escape the interpreter; they are
/// logged and the store is left as it was.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not connect to {url}")]
    Connect { url: String },
}
