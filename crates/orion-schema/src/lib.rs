//! Schema tree engine for Orion.
//!
//! This crate handles:
//! - Locating nodes by id
//! - Pure insert / update / delete over the tree
//! - Subtree cloning with fresh ids
//! - Built-in templates and the seed schema
//! - Editor intents with diagnostics

pub mod engine;
pub mod error;
pub mod intent;
pub mod style;
pub mod templates;

pub use engine::{
    clone_with_fresh_ids, clone_with_ids, contains, delete, find, find_parent, insert_child,
    update_behavior, update_props,
};
pub use error::{Result, SchemaError};
pub use intent::{apply, Applied, EditIntent};
pub use style::{replace_class, set_width_class, WIDTH_FAMILY};
pub use templates::{initial_schema, Template, TemplateRegistry};
