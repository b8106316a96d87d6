//! Error types for the Orion core.

use thiserror::Error;

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while building or merging node data.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid props for {kind}: {source}")]
    InvalidProps {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown component kind: {0}")]
    UnknownKind(String),
}
