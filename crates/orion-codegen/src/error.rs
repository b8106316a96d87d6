//! Error types for code generation.

use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Dialect name not recognized.
    #[error("Unknown dialect '{0}' (expected 'react' or 'vue')")]
    UnknownDialect(String),
}
