//! The runtime variable store.

use indexmap::IndexMap;
use orion_core::is_truthy;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// A flat name → value mapping shared by every node of a session.
///
/// Cloning the store clones the handle, not the contents: all clones observe
/// the same variables. Unknown names read as absent until written.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    vars: Rc<RefCell<IndexMap<String, Value>>>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding the variables of a snapshot.
    pub fn from_snapshot(snapshot: Map<String, Value>) -> Self {
        let store = Self::new();
        store.restore(snapshot);
        store
    }

    /// Current value of `name`, if it was ever written.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.vars.borrow().get(name).cloned()
    }

    /// Truthiness of `name`; absent variables are falsy.
    pub fn is_truthy(&self, name: &str) -> bool {
        is_truthy(self.vars.borrow().get(name))
    }

    /// Write `value`, returning the previous one.
    pub fn set(&self, name: &str, value: Value) -> Option<Value> {
        tracing::trace!(name, %value, "store write");
        self.vars.borrow_mut().insert(name.to_string(), value)
    }

    /// Create `name` with an empty string unless it already exists.
    ///
    /// Returns `true` if the variable was created.
    pub fn declare(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        let mut vars = self.vars.borrow_mut();
        if vars.contains_key(name) {
            return false;
        }
        vars.insert(name.to_string(), Value::String(String::new()));
        true
    }

    pub fn remove(&self, name: &str) -> Option<Value> {
        self.vars.borrow_mut().shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.borrow().contains_key(name)
    }

    /// Variable names in first-write order.
    pub fn names(&self) -> Vec<String> {
        self.vars.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.vars.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.borrow().is_empty()
    }

    /// Copy of every variable, suitable for persisting as JSON.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.vars
            .borrow()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Replace all variables with those of `snapshot`.
    pub fn restore(&self, snapshot: Map<String, Value>) {
        let mut vars = self.vars.borrow_mut();
        vars.clear();
        vars.extend(snapshot);
    }

    /// Whether two handles share the same variables.
    pub fn same_store(&self, other: &VariableStore) -> bool {
        Rc::ptr_eq(&self.vars, &other.vars)
    }
}
