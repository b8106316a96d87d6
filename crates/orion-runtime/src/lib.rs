//! Runtime logic for Orion schemas.
//!
//! This crate handles:
//! - The shared variable store
//! - Visibility and binding resolution at render time
//! - Action execution and interaction dispatch
//! - HTTP access for `apiRequest` actions

pub mod error;
pub mod http;
pub mod interpreter;
pub mod render;
pub mod store;

pub use error::{NetworkError, Result};
pub use http::{HttpClient, HttpOptions, HttpResponse, ReqwestClient};
pub use interpreter::{
    fallback_payload, EventOutcome, InteractionEvent, Interpreter, LogNotifier, Notifier, Outcome,
    PendingRequest, RecordingNotifier,
};
pub use render::{render, BoundValue, Interactions, ListView, Mode, RenderContext, RenderNode};
pub use store::VariableStore;
