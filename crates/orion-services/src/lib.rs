//! Services around the Orion schema core.
//!
//! - [`EditorSession`]: the tree being edited, its selection and mode
//! - [`SyncHub`]: collaboration between editor instances
//! - [`ProjectStore`]: named project persistence
//! - [`ContentGenerator`]: AI-generated DataList content

pub mod ai;
pub mod error;
pub mod session;
pub mod storage;
pub mod sync;

pub use ai::{parse_reply, request_body, ContentGenerator, GeminiGenerator, GeminiOptions};
pub use error::{GenerationError, Result, SessionError, StorageError, SyncError};
pub use session::EditorSession;
pub use storage::{JsonFileStore, MemoryStore, ProjectStore, SavedProject};
pub use sync::{Subscription, SyncHub, SyncMessage, SyncPeer};
