//! Pure structural operations over a schema tree.
//!
//! Every mutating operation takes the current tree by reference and returns
//! `Some(new_tree)` when something changed, or `None` when the request was a
//! structural no-op (unknown id, leaf target, protected root, nothing to
//! merge). The input tree is never modified.
//!
//! Operations address nodes by id and act on the first match in pre-order,
//! the same node [`find`] returns.

use orion_core::{BehaviorPatch, Node, NodeId, ROOT_ID};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Outcome of a targeted edit while walking the tree.
enum Edit {
    /// No node with the id in this subtree.
    NotFound,
    /// The target was found but the edit does not apply.
    Unchanged,
    /// The subtree was rebuilt.
    Changed(Node),
}

impl Edit {
    fn into_option(self) -> Option<Node> {
        match self {
            Edit::Changed(node) => Some(node),
            Edit::NotFound | Edit::Unchanged => None,
        }
    }
}

/// Depth-first search, parent before children.
pub fn find<'a>(tree: &'a Node, id: &str) -> Option<&'a Node> {
    tree.iter().find(|node| node.id == id)
}

/// The container holding the node with `id`, if any.
pub fn find_parent<'a>(tree: &'a Node, id: &str) -> Option<&'a Node> {
    tree.iter()
        .find(|node| node.children().iter().any(|child| child.id == id))
}

/// Whether `id` occurs anywhere in the tree.
pub fn contains(tree: &Node, id: &str) -> bool {
    find(tree, id).is_some()
}

/// Append `new_node` to the children of the container `container_id`.
///
/// Leaves, unknown ids and subtrees whose ids already occur in the tree are
/// rejected.
pub fn insert_child(tree: &Node, container_id: &str, new_node: Node) -> Option<Node> {
    let taken: HashSet<&NodeId> = tree.ids().into_iter().collect();
    if let Some(dup) = new_node.ids().into_iter().find(|id| taken.contains(id)) {
        tracing::debug!(id = %dup, "insert rejected: id already in tree");
        return None;
    }

    let mut new_node = Some(new_node);
    let result = edit_at(tree, container_id, &mut |target| {
        if !target.is_container() {
            tracing::debug!(id = %target.id, kind = %target.kind(), "insert rejected: not a container");
            return None;
        }
        let mut children = target.children().to_vec();
        children.extend(new_node.take());
        Some(rebuild(target, children))
    });
    log_missing(&result, container_id, "insert");
    result.into_option()
}

/// Shallow-merge `partial` into the props of node `id`.
///
/// A `null` value clears the key. Merges that would leave the props ill-typed
/// for the node's kind are rejected.
pub fn update_props(tree: &Node, id: &str, partial: &Map<String, Value>) -> Option<Node> {
    let result = edit_at(tree, id, &mut |target| {
        let props = match target.props.merged(partial) {
            Ok(props) => props,
            Err(err) => {
                tracing::warn!(id = %target.id, "props update rejected: {err}");
                return None;
            }
        };
        if props == target.props {
            return None;
        }
        let mut node = target.clone();
        node.props = props;
        Some(node)
    });
    log_missing(&result, id, "update_props");
    result.into_option()
}

/// Shallow-merge non-prop fields into node `id`.
pub fn update_behavior(tree: &Node, id: &str, patch: &BehaviorPatch) -> Option<Node> {
    let result = edit_at(tree, id, &mut |target| {
        let behavior = patch.apply(&target.behavior);
        if behavior == target.behavior {
            return None;
        }
        let mut node = target.clone();
        node.behavior = behavior;
        Some(node)
    });
    log_missing(&result, id, "update_behavior");
    result.into_option()
}

/// Remove node `id` and its subtree. The tree root and the reserved root id
/// are never deleted.
pub fn delete(tree: &Node, id: &str) -> Option<Node> {
    if tree.id == id || id == ROOT_ID {
        tracing::debug!(id, "delete rejected: root is protected");
        return None;
    }
    let result = remove_at(tree, id);
    log_missing(&result, id, "delete");
    result.into_option()
}

/// Deep-clone a subtree, giving every node a freshly generated id.
pub fn clone_with_fresh_ids(node: &Node) -> Node {
    clone_with_ids(node, &mut |n| NodeId::generate(&id_prefix(n)))
}

/// Deep-clone a subtree, drawing each new id from `next_id`.
///
/// Kind, props, behavior and child order are preserved.
pub fn clone_with_ids(node: &Node, next_id: &mut dyn FnMut(&Node) -> NodeId) -> Node {
    let id = next_id(node);
    let children = node
        .children
        .as_ref()
        .map(|children| children.iter().map(|child| clone_with_ids(child, next_id)).collect());
    Node {
        id,
        props: node.props.clone(),
        children,
        behavior: node.behavior.clone(),
    }
}

/// Id prefix for generated ids: the lowercased wire type name.
pub(crate) fn id_prefix(node: &Node) -> String {
    node.props.type_name().to_lowercase()
}

fn edit_at(node: &Node, id: &str, f: &mut dyn FnMut(&Node) -> Option<Node>) -> Edit {
    if node.id == id {
        return match f(node) {
            Some(changed) => Edit::Changed(changed),
            None => Edit::Unchanged,
        };
    }
    for (index, child) in node.children().iter().enumerate() {
        match edit_at(child, id, f) {
            Edit::NotFound => continue,
            Edit::Unchanged => return Edit::Unchanged,
            Edit::Changed(new_child) => {
                let mut children = node.children().to_vec();
                children[index] = new_child;
                return Edit::Changed(rebuild(node, children));
            }
        }
    }
    Edit::NotFound
}

fn remove_at(node: &Node, id: &str) -> Edit {
    for (index, child) in node.children().iter().enumerate() {
        if child.id == id {
            let mut children = node.children().to_vec();
            children.remove(index);
            return Edit::Changed(rebuild(node, children));
        }
        match remove_at(child, id) {
            Edit::NotFound => continue,
            Edit::Unchanged => return Edit::Unchanged,
            Edit::Changed(new_child) => {
                let mut children = node.children().to_vec();
                children[index] = new_child;
                return Edit::Changed(rebuild(node, children));
            }
        }
    }
    Edit::NotFound
}

fn rebuild(node: &Node, children: Vec<Node>) -> Node {
    Node {
        id: node.id.clone(),
        props: node.props.clone(),
        children: Some(children),
        behavior: node.behavior.clone(),
    }
}

fn log_missing(result: &Edit, id: &str, op: &str) {
    if matches!(result, Edit::NotFound) {
        tracing::debug!(id, op, "no node with id");
    }
}
