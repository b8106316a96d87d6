//! Render-time resolution of a schema tree.
//!
//! The render surface itself lives outside this crate. What it receives is a
//! [`RenderNode`] tree: the nodes that should appear, their resolved props,
//! the bound value for controlled inputs, and which interactions to wire.

use crate::store::VariableStore;
use orion_core::{Animation, ListItem, Node, NodeId, NodeKind, Props, ValueSlot};
use serde_json::Value;

/// Render mode, global to one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Static editing view: bindings, visibility and actions are inert.
    #[default]
    Design,
    /// Live preview: everything is interpreted against the store.
    Interactive,
}

/// Value pushed into a bound node.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Checked(bool),
    Value(Value),
}

/// Interactions the surface should forward for a node. Selection is always
/// forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interactions {
    pub click: bool,
    pub hover: bool,
    pub blur: bool,
    pub value_change: bool,
}

/// Processed rows of a DataList.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub items: Vec<ListItem>,
    pub empty_message: Option<&'static str>,
}

/// One node as the render surface should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub props: Props,
    pub bound: Option<BoundValue>,
    pub tooltip: Option<String>,
    pub animation: Option<Animation>,
    pub selected: bool,
    pub interactions: Interactions,
    pub list: Option<ListView>,
    /// Set for kinds this build cannot draw; the surface shows this text.
    pub placeholder: Option<String>,
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    /// Pre-order search by id.
    pub fn find(&self, id: &str) -> Option<&RenderNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of rendered nodes in this subtree.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(RenderNode::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Inputs of a render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub mode: Mode,
    pub selection: Option<&'a str>,
    pub store: &'a VariableStore,
}

impl<'a> RenderContext<'a> {
    pub fn new(mode: Mode, store: &'a VariableStore) -> Self {
        Self {
            mode,
            selection: None,
            store,
        }
    }

    pub fn with_selection(mut self, selection: Option<&'a str>) -> Self {
        self.selection = selection;
        self
    }
}

/// Resolve `tree` for display. Returns `None` when the root itself is hidden.
pub fn render(tree: &Node, ctx: &RenderContext<'_>) -> Option<RenderNode> {
    if tree.kind() == NodeKind::Unknown {
        tracing::warn!(id = %tree.id, kind = tree.props.type_name(), "rendering placeholder for unknown kind");
        return Some(RenderNode {
            placeholder: Some(format!("Unknown: {}", tree.props.type_name())),
            ..base(tree, tree.props.clone(), ctx)
        });
    }

    let interactive = ctx.mode == Mode::Interactive;
    if interactive {
        if let Some(variable) = tree.behavior.visible_if.as_deref() {
            if !ctx.store.is_truthy(variable) {
                return None;
            }
        }
    }

    let mut props = tree.props.clone();
    let mut bound = None;
    if interactive {
        if let Some(variable) = tree.behavior.bind.as_deref() {
            let value = ctx.store.get(variable);
            bound = Some(match tree.kind().value_slot() {
                ValueSlot::Checked => BoundValue::Checked(ctx.store.is_truthy(variable)),
                ValueSlot::Value => BoundValue::Value(value.clone().unwrap_or_else(|| Value::String(String::new()))),
            });
            props.apply_bound_value(value.as_ref());
        }
    }

    let list = match &props {
        Props::DataList(list) => {
            let items: Vec<ListItem> = list.visible_items().into_iter().cloned().collect();
            let empty_message = list.empty_message(items.len());
            Some(ListView { items, empty_message })
        }
        _ => None,
    };

    let behavior = &tree.behavior;
    let interactions = if interactive {
        Interactions {
            click: behavior.on_click.is_some(),
            hover: behavior.on_hover.is_some(),
            blur: behavior.on_blur.is_some(),
            value_change: behavior.bind.is_some(),
        }
    } else {
        Interactions::default()
    };

    Some(RenderNode {
        bound,
        interactions,
        list,
        children: tree.children().iter().filter_map(|child| render(child, ctx)).collect(),
        ..base(tree, props, ctx)
    })
}

fn base(tree: &Node, props: Props, ctx: &RenderContext<'_>) -> RenderNode {
    RenderNode {
        id: tree.id.clone(),
        kind: tree.kind(),
        props,
        bound: None,
        tooltip: tree.behavior.tooltip.clone(),
        animation: tree.behavior.animation,
        selected: ctx.selection.map_or(false, |id| tree.id == id),
        interactions: Interactions::default(),
        list: None,
        placeholder: None,
        children: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orion_core::{Action, Behavior, ProgressProps};
    use serde_json::json;

    fn tree() -> Node {
        let toggle = Node::with_props("t", Props::palette(NodeKind::Toggle)).with_behavior(Behavior {
            bind: Some("dark".into()),
            ..Default::default()
        });
        let input = Node::with_props("i", Props::palette(NodeKind::Input)).with_behavior(Behavior {
            bind: Some("name".into()),
            on_blur: Some(Action::alert("bye")),
            ..Default::default()
        });
        let panel = Node::with_props("panel", Props::palette(NodeKind::Card))
            .with_child(Node::with_props("inner", Props::palette(NodeKind::Text)))
            .with_behavior(Behavior {
                visible_if: Some("open".into()),
                ..Default::default()
            });
        Node::with_props("root", Props::palette(NodeKind::Container))
            .with_child(toggle)
            .with_child(input)
            .with_child(panel)
    }

    #[test]
    fn test_design_mode_ignores_logic() {
        let store = VariableStore::new();
        let ctx = RenderContext::new(Mode::Design, &store).with_selection(Some("i"));
        let out = render(&tree(), &ctx).unwrap();

        assert_eq!(out.len(), 5);
        let input = out.find("i").unwrap();
        assert!(input.selected);
        assert_eq!(input.bound, None);
        assert_eq!(input.interactions, Interactions::default());
    }

    #[test]
    fn test_visible_if_hides_subtree() {
        let store = VariableStore::new();
        let ctx = RenderContext::new(Mode::Interactive, &store);
        let hidden = render(&tree(), &ctx).unwrap();
        assert!(hidden.find("panel").is_none());
        assert!(hidden.find("inner").is_none());

        store.set("open", json!(true));
        let shown = render(&tree(), &ctx).unwrap();
        assert!(shown.find("inner").is_some());
    }

    #[test]
    fn test_bind_resolves_by_slot() {
        let store = VariableStore::new();
        let ctx = RenderContext::new(Mode::Interactive, &store);
        let out = render(&tree(), &ctx).unwrap();
        assert_eq!(out.find("t").unwrap().bound, Some(BoundValue::Checked(false)));
        assert_eq!(out.find("i").unwrap().bound, Some(BoundValue::Value(json!(""))));
        assert!(out.find("i").unwrap().interactions.blur);
        assert!(out.find("i").unwrap().interactions.value_change);

        store.set("dark", json!("yes"));
        store.set("name", json!("Ada"));
        let out = render(&tree(), &ctx).unwrap();
        assert_eq!(out.find("t").unwrap().bound, Some(BoundValue::Checked(true)));
        assert_eq!(out.find("i").unwrap().bound, Some(BoundValue::Value(json!("Ada"))));
    }

    #[test]
    fn test_bound_progress_overrides_prop() {
        let store = VariableStore::new();
        store.set("pct", json!(90));
        let node = Node::with_props("p", Props::palette(NodeKind::Progress)).with_behavior(Behavior {
            bind: Some("pct".into()),
            ..Default::default()
        });
        let out = render(&node, &RenderContext::new(Mode::Interactive, &store)).unwrap();
        assert_eq!(
            out.props,
            Props::Progress(ProgressProps {
                value: Some(90.0),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_unknown_kind_renders_placeholder() {
        let node: Node = serde_json::from_value(json!({"id": "x", "type": "Hologram", "props": {}})).unwrap();
        let store = VariableStore::new();
        let out = render(&node, &RenderContext::new(Mode::Interactive, &store)).unwrap();
        assert_eq!(out.placeholder.as_deref(), Some("Unknown: Hologram"));
    }

    #[test]
    fn test_data_list_view() {
        let store = VariableStore::new();
        let node = Node::with_props("l", Props::palette(NodeKind::DataList));
        let out = render(&node, &RenderContext::new(Mode::Design, &store)).unwrap();
        let list = out.list.unwrap();
        assert!(list.items.is_empty());
        assert_eq!(list.empty_message, Some("List is empty. Use Orion AI to fill data."));
    }
}
