//! Core types for the Orion schema engine.
//!
//! This crate provides the foundational types used across all other orion crates:
//! - The recursive [`Node`] tree and its behavior fields
//! - Typed component props, one variant per [`NodeKind`]
//! - Runtime [`Action`] descriptions
//! - Identifier and value helpers
//! - Error types

pub mod action;
pub mod errors;
pub mod node;
pub mod props;
pub mod types;

pub use action::*;
pub use errors::*;
pub use node::*;
pub use props::*;
pub use types::*;
