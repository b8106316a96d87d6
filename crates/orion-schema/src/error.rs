//! Error types for schema edits.

use orion_core::CoreError;
use thiserror::Error;

/// Result alias for schema edits.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Why an edit intent left the tree unchanged.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("No node with id '{0}'")]
    NotFound(String),

    #[error("Node '{0}' cannot hold children")]
    NotAContainer(String),

    #[error("The root node cannot be deleted")]
    RootProtected,

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Id '{0}' already exists in the tree")]
    DuplicateId(String),

    #[error("Invalid props for node '{id}': {source}")]
    InvalidProps {
        id: String,
        #[source]
        source: CoreError,
    },

    #[error("Edit on node '{0}' changes nothing")]
    Unchanged(String),
}
