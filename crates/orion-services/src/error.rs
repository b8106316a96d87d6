//! Error types for the editor services.

use orion_schema::SchemaError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from a project store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt project file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode projects: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The single failure signal of the AI content collaborator. Details are
/// logged where they occur.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("generation failed")]
pub struct GenerationError;

/// Errors from the collaboration channel.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Failed to encode schema update: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Malformed sync message: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Sync peer is closed")]
    Closed,
}

/// Errors from an editor session operation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Edit(#[from] SchemaError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("No saved project with id '{0}'")]
    ProjectNotFound(String),

    #[error("Node '{0}' is not a DataList")]
    NotADataList(String),
}

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
