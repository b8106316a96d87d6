//! Source generation for Orion schemas.
//!
//! A schema tree is exported as a standalone component in one of two
//! dialects:
//! - React: a function component returning JSX
//! - Vue: a single-file component with a static template
//!
//! Every component kind maps to markup in both dialects. Kinds this build
//! does not recognize still export, as a tagged placeholder element.

pub mod classes;
pub mod error;
pub mod generators;
pub mod markup;

pub use error::{CodegenError, Result};
pub use generators::{generator, CodeGenerator, Dialect, EmitOptions, ReactGenerator, VueGenerator};

use orion_core::Node;

/// Export `tree` as a complete document in `dialect`.
pub fn emit(tree: &Node, dialect: Dialect, options: &EmitOptions) -> String {
    tracing::debug!(dialect = %dialect, nodes = tree.len(), "generating source");
    generator(dialect, options.clone()).generate_document(tree)
}

/// Export `tree` as a React component with default options.
pub fn emit_react(tree: &Node) -> String {
    emit(tree, Dialect::React, &EmitOptions::default())
}

/// Export `tree` as a Vue SFC with default options.
pub fn emit_vue(tree: &Node) -> String {
    emit(tree, Dialect::Vue, &EmitOptions::default())
}
