//! Edit intents issued by the editor and their application to a tree.

use crate::engine;
use crate::error::{Result, SchemaError};
use crate::templates::TemplateRegistry;
use orion_core::{BehaviorPatch, Node, NodeId, NodeKind, ROOT_ID};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// A single structural edit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditIntent {
    /// Add a palette-default node of `kind` under `parent`.
    AddNode { parent: NodeId, kind: NodeKind },
    /// Add a prepared node under `parent`.
    Insert { parent: NodeId, node: Node },
    /// Add a fresh copy of a registered template under `parent`.
    AddTemplate { parent: NodeId, template: String },
    /// Shallow-merge props; `null` clears a key.
    SetProps { id: NodeId, props: Map<String, Value> },
    /// Shallow-merge behavior fields.
    SetBehavior { id: NodeId, patch: BehaviorPatch },
    /// Remove a node and its subtree.
    Delete { id: NodeId },
}

/// A successfully applied edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub tree: Node,
    /// Id of the subtree root added by an insertion.
    pub inserted: Option<NodeId>,
}

impl EditIntent {
    /// Id of the node the intent addresses.
    pub fn target(&self) -> &NodeId {
        match self {
            EditIntent::AddNode { parent, .. }
            | EditIntent::Insert { parent, .. }
            | EditIntent::AddTemplate { parent, .. } => parent,
            EditIntent::SetProps { id, .. }
            | EditIntent::SetBehavior { id, .. }
            | EditIntent::Delete { id } => id,
        }
    }
}

/// Apply `intent` to `tree`.
///
/// The tree is never modified; on error the caller keeps the tree it has.
pub fn apply(tree: &Node, intent: &EditIntent, templates: &TemplateRegistry) -> Result<Applied> {
    match intent {
        EditIntent::AddNode { parent, kind } => insert(tree, parent, Node::new(*kind)),
        EditIntent::Insert { parent, node } => insert(tree, parent, node.clone()),
        EditIntent::AddTemplate { parent, template } => {
            let template = templates
                .get(template)
                .ok_or_else(|| SchemaError::UnknownTemplate(template.clone()))?;
            insert(tree, parent, template.instantiate(tree))
        }
        EditIntent::SetProps { id, props } => {
            let target = lookup(tree, id)?;
            if let Err(source) = target.props.merged(props) {
                return Err(SchemaError::InvalidProps { id: id.to_string(), source });
            }
            engine::update_props(tree, id.as_str(), props)
                .map(changed)
                .ok_or_else(|| SchemaError::Unchanged(id.to_string()))
        }
        EditIntent::SetBehavior { id, patch } => {
            lookup(tree, id)?;
            engine::update_behavior(tree, id.as_str(), patch)
                .map(changed)
                .ok_or_else(|| SchemaError::Unchanged(id.to_string()))
        }
        EditIntent::Delete { id } => {
            if tree.id == *id || id.as_str() == ROOT_ID {
                return Err(SchemaError::RootProtected);
            }
            lookup(tree, id)?;
            engine::delete(tree, id.as_str())
                .map(changed)
                .ok_or_else(|| SchemaError::NotFound(id.to_string()))
        }
    }
}

fn insert(tree: &Node, parent: &NodeId, node: Node) -> Result<Applied> {
    let target = lookup(tree, parent)?;
    if !target.is_container() {
        return Err(SchemaError::NotAContainer(parent.to_string()));
    }
    let taken: HashSet<&NodeId> = tree.ids().into_iter().collect();
    if let Some(dup) = node.ids().into_iter().find(|id| taken.contains(id)) {
        return Err(SchemaError::DuplicateId(dup.to_string()));
    }

    let inserted = node.id.clone();
    tracing::debug!(parent = %parent, id = %inserted, kind = %node.kind(), "inserting node");
    engine::insert_child(tree, parent.as_str(), node)
        .map(|tree| Applied { tree, inserted: Some(inserted) })
        .ok_or_else(|| SchemaError::NotAContainer(parent.to_string()))
}

fn lookup<'a>(tree: &'a Node, id: &NodeId) -> Result<&'a Node> {
    engine::find(tree, id.as_str()).ok_or_else(|| SchemaError::NotFound(id.to_string()))
}

fn changed(tree: Node) -> Applied {
    Applied { tree, inserted: None }
}
