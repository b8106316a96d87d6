//! The editor session: one schema tree being edited, its selection and mode.
//!
//! Every edit goes through an [`EditIntent`]. A successful edit replaces the
//! tree and is broadcast to the attached sync peer; a failed one leaves the
//! tree untouched and reports why.

use crate::ai::ContentGenerator;
use crate::error::{Result, SessionError};
use crate::storage::{ProjectStore, SavedProject};
use crate::sync::{Subscription, SyncPeer};
use orion_codegen::{emit, Dialect, EmitOptions};
use orion_core::{BehaviorPatch, Node, NodeId, NodeKind, Props};
use orion_runtime::{render, Mode, RenderContext, RenderNode, VariableStore};
use orion_schema::{apply, find, initial_schema, EditIntent, SchemaError, TemplateRegistry};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// An editing session.
#[derive(Debug)]
pub struct EditorSession {
    tree: Node,
    selection: NodeId,
    mode: Mode,
    templates: TemplateRegistry,
    sync: Option<Attached>,
}

#[derive(Debug)]
struct Attached {
    peer: SyncPeer,
    inbox: Rc<RefCell<Option<Node>>>,
    subscription: Subscription,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(initial_schema())
    }
}

impl EditorSession {
    /// Session over `tree` with the built-in templates. The root is selected.
    pub fn new(tree: Node) -> Self {
        Self {
            selection: tree.id.clone(),
            tree,
            mode: Mode::Design,
            templates: TemplateRegistry::builtin(),
            sync: None,
        }
    }

    pub fn with_templates(mut self, templates: TemplateRegistry) -> Self {
        self.templates = templates;
        self
    }

    /// Broadcast edits through `peer` and queue trees it receives.
    pub fn attach_sync(&mut self, peer: SyncPeer) -> std::result::Result<(), crate::SyncError> {
        let inbox = Rc::new(RefCell::new(None));
        let sink = inbox.clone();
        let subscription = peer.subscribe(move |tree: &Node| {
            *sink.borrow_mut() = Some(tree.clone());
        })?;
        if let Some(previous) = self.sync.replace(Attached {
            peer,
            inbox,
            subscription,
        }) {
            previous.subscription.unsubscribe();
        }
        Ok(())
    }

    /// Detach from sync, returning the peer.
    pub fn detach_sync(&mut self) -> Option<SyncPeer> {
        self.sync.take().map(|attached| {
            attached.subscription.unsubscribe();
            attached.peer
        })
    }

    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn selection(&self) -> &NodeId {
        &self.selection
    }

    pub fn selected_node(&self) -> Option<&Node> {
        find(&self.tree, self.selection.as_str())
    }

    /// Select `id`. Unknown ids leave the selection as it is.
    pub fn select(&mut self, id: &str) -> bool {
        if find(&self.tree, id).is_none() {
            tracing::debug!(id, "ignoring selection of unknown node");
            return false;
        }
        self.selection = NodeId::from(id);
        true
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Apply an edit. Returns the id of any inserted subtree.
    pub fn apply(&mut self, intent: &EditIntent) -> Result<Option<NodeId>> {
        let applied = apply(&self.tree, intent, &self.templates)?;
        self.replace_tree(applied.tree, true);
        Ok(applied.inserted)
    }

    /// Add a palette node of `kind` under the selected container.
    pub fn add_node(&mut self, kind: NodeKind) -> Result<NodeId> {
        let parent = self.selected_container()?;
        let inserted = self.apply(&EditIntent::AddNode { parent, kind })?;
        self.inserted(inserted)
    }

    /// Add a fresh copy of template `template` under the selected container.
    pub fn add_template(&mut self, template: &str) -> Result<NodeId> {
        let parent = self.selected_container()?;
        let intent = EditIntent::AddTemplate {
            parent,
            template: template.to_string(),
        };
        let inserted = self.apply(&intent)?;
        self.inserted(inserted)
    }

    pub fn set_props(&mut self, id: &str, props: Map<String, Value>) -> Result<()> {
        self.apply(&EditIntent::SetProps {
            id: NodeId::from(id),
            props,
        })
        .map(drop)
    }

    pub fn set_behavior(&mut self, id: &str, patch: BehaviorPatch) -> Result<()> {
        self.apply(&EditIntent::SetBehavior {
            id: NodeId::from(id),
            patch,
        })
        .map(drop)
    }

    /// Delete the selected node; the selection falls back to the root.
    pub fn delete_selected(&mut self) -> Result<()> {
        let id = self.selection.clone();
        self.apply(&EditIntent::Delete { id }).map(drop)
    }

    /// Replace the tree with one received from a collaborator, without
    /// broadcasting it back.
    pub fn adopt(&mut self, tree: Node) {
        self.replace_tree(tree, false);
    }

    /// Adopt the most recent tree received over sync, if any.
    pub fn pull_remote(&mut self) -> bool {
        let received = self.sync.as_ref().and_then(|attached| attached.inbox.borrow_mut().take());
        match received {
            Some(tree) => {
                tracing::debug!(nodes = tree.len(), "adopting remote schema");
                self.adopt(tree);
                true
            }
            None => false,
        }
    }

    pub fn save_project(&self, store: &mut dyn ProjectStore, name: &str) -> Result<SavedProject> {
        Ok(store.save_project(name, &self.tree)?)
    }

    /// Load a saved project as the current tree and broadcast it.
    pub fn load_project(&mut self, store: &dyn ProjectStore, id: &str) -> Result<SavedProject> {
        let project = store
            .load_project(id)?
            .ok_or_else(|| SessionError::ProjectNotFound(id.to_string()))?;
        self.replace_tree(project.schema.clone(), true);
        self.selection = self.tree.id.clone();
        Ok(project)
    }

    /// Replace the items of DataList `id` with generated ones.
    pub async fn fill_list(&mut self, generator: &dyn ContentGenerator, id: &str, prompt: &str) -> Result<usize> {
        match find(&self.tree, id) {
            Some(node) if matches!(node.props, Props::DataList(_)) => {}
            Some(_) => return Err(SessionError::NotADataList(id.to_string())),
            None => return Err(SchemaError::NotFound(id.to_string()).into()),
        }
        let items = generator.generate_list_items(prompt).await?;
        let count = items.len();
        let mut props = Map::new();
        let items = items.iter().filter_map(|item| serde_json::to_value(item).ok()).collect();
        props.insert("items".to_string(), Value::Array(items));
        match self.set_props(id, props) {
            Ok(()) | Err(SessionError::Edit(SchemaError::Unchanged(_))) => Ok(count),
            Err(err) => Err(err),
        }
    }

    /// Render the tree against `store` with this session's mode and selection.
    pub fn render(&self, store: &VariableStore) -> Option<RenderNode> {
        let ctx = RenderContext::new(self.mode, store).with_selection(Some(self.selection.as_str()));
        render(&self.tree, &ctx)
    }

    /// Export the tree as source in `dialect`.
    pub fn export(&self, dialect: Dialect, options: &EmitOptions) -> String {
        emit(&self.tree, dialect, options)
    }

    fn selected_container(&self) -> Result<NodeId> {
        match self.selected_node() {
            Some(node) if node.is_container() => Ok(self.selection.clone()),
            Some(_) => Err(SchemaError::NotAContainer(self.selection.to_string()).into()),
            None => Err(SchemaError::NotFound(self.selection.to_string()).into()),
        }
    }

    fn inserted(&self, id: Option<NodeId>) -> Result<NodeId> {
        id.ok_or_else(|| SchemaError::Unchanged(self.selection.to_string()).into())
    }

    fn replace_tree(&mut self, tree: Node, broadcast: bool) {
        self.tree = tree;
        if find(&self.tree, self.selection.as_str()).is_none() {
            self.selection = self.tree.id.clone();
        }
        if !broadcast {
            return;
        }
        if let Some(attached) = &self.sync {
            if let Err(err) = attached.peer.broadcast_update(&self.tree) {
                tracing::warn!("schema update not broadcast: {err}");
            }
        }
    }
}
