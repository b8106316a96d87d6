//! Action execution and interaction dispatch.
//!
//! Synchronous actions (`toggle`, `set`, `alert`) finish inside
//! [`Interpreter::execute`]. An `apiRequest` comes back as a
//! [`PendingRequest`]; the host awaits it whenever it likes and keeps
//! handling other events meanwhile. The response is written to whatever
//! the store holds at that moment: last write wins.

use crate::http::HttpClient;
use crate::render::Mode;
use crate::store::VariableStore;
use orion_core::{Action, EventSlot, HttpMethod, Node, NodeId, ValidAction};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Surfaces `alert` messages to the user.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that writes alerts to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(message, "alert");
    }
}

/// Notifier that keeps every alert for later display.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded messages.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.borrow_mut())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// What executing an action did.
#[derive(Debug)]
pub enum Outcome {
    /// The store was written.
    Applied,
    /// An alert was shown.
    Notified(String),
    /// The action was malformed and did nothing.
    Inert,
    /// A network call is ready to run.
    Pending(PendingRequest),
}

/// An interaction forwarded by the render surface.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    Select,
    Click,
    Hover,
    Blur,
    ValueChange(Value),
}

/// What handling an interaction did.
#[derive(Debug)]
pub enum EventOutcome {
    /// The node became the selection.
    Selected(NodeId),
    /// The node's action ran.
    Action(Outcome),
    /// A bound value was written back to the store.
    ValueWritten { variable: String },
    /// Nothing to do for this node, event and mode.
    Ignored,
}

/// Executes actions against a shared variable store.
#[derive(Clone)]
pub struct Interpreter {
    store: VariableStore,
    client: Rc<dyn HttpClient>,
    notifier: Rc<dyn Notifier>,
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter").field("store", &self.store).finish_non_exhaustive()
    }
}

impl Interpreter {
    pub fn new(store: VariableStore, client: Rc<dyn HttpClient>) -> Self {
        Self {
            store,
            client,
            notifier: Rc::new(LogNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Rc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn store(&self) -> &VariableStore {
        &self.store
    }

    /// Execute `action`. Never fails; malformed actions are inert.
    pub fn execute(&self, action: &Action) -> Outcome {
        let Some(valid) = action.validate() else {
            tracing::debug!(action = action.type_name(), "ignoring malformed action");
            return Outcome::Inert;
        };

        match valid {
            ValidAction::Toggle { target } => {
                let next = !self.store.is_truthy(target);
                self.store.set(target, Value::Bool(next));
                Outcome::Applied
            }
            ValidAction::Set { target, value } => {
                self.store.set(target, value.clone());
                Outcome::Applied
            }
            ValidAction::Alert { message } => {
                self.notifier.notify(message);
                Outcome::Notified(message.to_string())
            }
            ValidAction::ApiRequest { url, method, target } => Outcome::Pending(PendingRequest {
                client: Rc::clone(&self.client),
                store: self.store.clone(),
                url: url.to_string(),
                method,
                target: target.map(str::to_string),
            }),
        }
    }

    /// Execute `action` and wait for any network call it starts.
    pub async fn run(&self, action: &Action) -> Outcome {
        match self.execute(action) {
            Outcome::Pending(request) => {
                if request.resolve().await {
                    Outcome::Applied
                } else {
                    Outcome::Inert
                }
            }
            other => other,
        }
    }

    /// Write a value coming from a bound input.
    pub fn write_back(&self, variable: &str, value: Value) {
        self.store.set(variable, value);
    }

    /// Dispatch an interaction on node `id` of `tree`.
    ///
    /// Selection works in both modes; everything else only in interactive
    /// mode.
    pub fn handle_event(&self, tree: &Node, mode: Mode, id: &str, event: InteractionEvent) -> EventOutcome {
        let Some(node) = tree.iter().find(|node| node.id == id) else {
            tracing::debug!(id, "event for unknown node");
            return EventOutcome::Ignored;
        };

        let slot = match event {
            InteractionEvent::Select => return EventOutcome::Selected(node.id.clone()),
            _ if mode == Mode::Design => return EventOutcome::Ignored,
            InteractionEvent::Click => EventSlot::Click,
            InteractionEvent::Hover => EventSlot::Hover,
            InteractionEvent::Blur => EventSlot::Blur,
            InteractionEvent::ValueChange(value) => {
                return match node.behavior.bind.as_deref() {
                    Some(variable) => {
                        self.write_back(variable, value);
                        EventOutcome::ValueWritten { variable: variable.to_string() }
                    }
                    None => EventOutcome::Ignored,
                };
            }
        };

        match node.behavior.action(slot) {
            Some(action) => EventOutcome::Action(self.execute(action)),
            None => EventOutcome::Ignored,
        }
    }
}

/// An `apiRequest` waiting to be sent.
pub struct PendingRequest {
    client: Rc<dyn HttpClient>,
    store: VariableStore,
    url: String,
    method: HttpMethod,
    target: Option<String>,
}

impl fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingRequest")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl PendingRequest {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Send the request and store the response body under the target.
    ///
    /// Returns whether the store was written. Failures are logged and
    /// swallowed.
    pub async fn resolve(self) -> bool {
        let response = match self.client.fetch(self.method, &self.url).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(url = %self.url, method = %self.method, "apiRequest failed: {err}");
                return false;
            }
        };

        let Some(target) = self.target.as_deref() else {
            return false;
        };
        let data = serde_json::from_str::<Value>(&response.body).unwrap_or_else(|_| fallback_payload());
        self.store.set(target, Value::String(format!("{data:#}")));
        true
    }
}

/// Stored when a response body is not JSON.
pub fn fallback_payload() -> Value {
    json!({"status": "ok", "data": "Mock Data"})
}
