//! The recursive schema node.

use crate::action::Action;
use crate::props::{NodeKind, Props, UnknownProps};
use crate::types::{Animation, NodeId};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A node in the schema tree.
///
/// `children` is `Some` exactly for container-like kinds; a leaf never holds a
/// child list, not even an empty one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WireNode")]
pub struct Node {
    pub id: NodeId,
    pub props: Props,
    pub children: Option<Vec<Node>>,
    pub behavior: Behavior,
}

/// Non-structural node fields: presentation metadata, bindings and events.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Behavior {
    pub tooltip: Option<String>,
    pub animation: Option<Animation>,
    pub bind: Option<String>,
    pub visible_if: Option<String>,
    pub on_click: Option<Action>,
    pub on_hover: Option<Action>,
    pub on_blur: Option<Action>,
}

/// The three action slots of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSlot {
    Click,
    Hover,
    Blur,
}

impl Behavior {
    pub fn action(&self, slot: EventSlot) -> Option<&Action> {
        match slot {
            EventSlot::Click => self.on_click.as_ref(),
            EventSlot::Hover => self.on_hover.as_ref(),
            EventSlot::Blur => self.on_blur.as_ref(),
        }
    }
}

/// A partial update of [`Behavior`].
///
/// The outer `Option` says whether a field is touched; the inner one is the new
/// value, so `Some(None)` clears a field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BehaviorPatch {
    pub tooltip: Option<Option<String>>,
    pub animation: Option<Option<Animation>>,
    pub bind: Option<Option<String>>,
    pub visible_if: Option<Option<String>>,
    pub on_click: Option<Option<Action>>,
    pub on_hover: Option<Option<Action>>,
    pub on_blur: Option<Option<Action>>,
}

impl BehaviorPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tooltip(mut self, tooltip: Option<&str>) -> Self {
        self.tooltip = Some(tooltip.map(str::to_string));
        self
    }

    pub fn animation(mut self, animation: Option<Animation>) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn bind(mut self, variable: Option<&str>) -> Self {
        self.bind = Some(variable.map(str::to_string));
        self
    }

    pub fn visible_if(mut self, variable: Option<&str>) -> Self {
        self.visible_if = Some(variable.map(str::to_string));
        self
    }

    pub fn action(mut self, slot: EventSlot, action: Option<Action>) -> Self {
        match slot {
            EventSlot::Click => self.on_click = Some(action),
            EventSlot::Hover => self.on_hover = Some(action),
            EventSlot::Blur => self.on_blur = Some(action),
        }
        self
    }

    /// True when the patch touches no field.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the patch, returning the merged behavior.
    pub fn apply(&self, behavior: &Behavior) -> Behavior {
        fn pick<T: Clone>(patch: &Option<Option<T>>, current: &Option<T>) -> Option<T> {
            match patch {
                Some(value) => value.clone(),
                None => current.clone(),
            }
        }

        Behavior {
            tooltip: pick(&self.tooltip, &behavior.tooltip),
            animation: pick(&self.animation, &behavior.animation),
            bind: pick(&self.bind, &behavior.bind),
            visible_if: pick(&self.visible_if, &behavior.visible_if),
            on_click: pick(&self.on_click, &behavior.on_click),
            on_hover: pick(&self.on_hover, &behavior.on_hover),
            on_blur: pick(&self.on_blur, &behavior.on_blur),
        }
    }
}

impl Node {
    /// Create a node of `kind` with palette defaults and a fresh id.
    pub fn new(kind: NodeKind) -> Self {
        Self::with_props(NodeId::generate(&kind.id_prefix()), Props::palette(kind))
    }

    /// Create a node with explicit id and props. Containers start empty.
    pub fn with_props(id: impl Into<NodeId>, props: Props) -> Self {
        let children = props.kind().is_container().then(Vec::new);
        Self {
            id: id.into(),
            props,
            children,
            behavior: Behavior::default(),
        }
    }

    /// Append a child (builder style). Ignored for leaf kinds.
    pub fn with_child(mut self, child: Node) -> Self {
        if let Some(children) = self.children.as_mut() {
            children.push(child);
        }
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.props.kind()
    }

    /// Whether children may be inserted under this node.
    pub fn is_container(&self) -> bool {
        self.kind().is_container() && self.children.is_some()
    }

    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Pre-order iterator over this node and its descendants.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }

    /// Every id in this subtree, in pre-order.
    pub fn ids(&self) -> Vec<&NodeId> {
        self.iter().map(|node| &node.id).collect()
    }

    /// Number of nodes in this subtree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// A node always contains at least itself.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Pre-order traversal of a subtree.
pub struct NodeIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Wire shape of a node: the JSON schema the editor and exports exchange.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireNode {
    id: NodeId,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    props: Map<String, Value>,
    #[serde(default)]
    children: Option<Vec<Node>>,
    #[serde(default)]
    tooltip: Option<String>,
    #[serde(default)]
    animation: Option<Value>,
    #[serde(default)]
    bind: Option<String>,
    #[serde(default)]
    visible_if: Option<String>,
    #[serde(default)]
    on_click: Option<Value>,
    #[serde(default)]
    on_hover: Option<Value>,
    #[serde(default)]
    on_blur: Option<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireNodeRef<'a> {
    id: &'a NodeId,
    #[serde(rename = "type")]
    type_name: &'a str,
    props: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<&'a Vec<Node>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tooltip: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    animation: Option<&'a Animation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bind: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    visible_if: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    on_click: Option<&'a Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    on_hover: Option<&'a Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    on_blur: Option<&'a Action>,
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let b = &self.behavior;
        WireNodeRef {
            id: &self.id,
            type_name: self.props.type_name(),
            props: self.props.to_map(),
            children: self.children.as_ref(),
            tooltip: b.tooltip.as_ref(),
            animation: b.animation.as_ref(),
            bind: b.bind.as_ref(),
            visible_if: b.visible_if.as_ref(),
            on_click: b.on_click.as_ref(),
            on_hover: b.on_hover.as_ref(),
            on_blur: b.on_blur.as_ref(),
        }
        .serialize(serializer)
    }
}

impl From<WireNode> for Node {
    fn from(wire: WireNode) -> Self {
        let props = match NodeKind::from_name(&wire.type_name) {
            Some(kind) => Props::parse_lossy(kind, wire.props),
            None => {
                tracing::warn!(id = %wire.id, kind = %wire.type_name, "unknown component kind");
                opaque(&wire.type_name, wire.props)
            }
        };

        let children = match (props.kind().is_container(), wire.children) {
            (true, children) => Some(children.unwrap_or_default()),
            (false, Some(children)) if props.kind() != NodeKind::Unknown && !children.is_empty() => {
                tracing::warn!(id = %wire.id, dropped = children.len(), "leaf node cannot hold children");
                None
            }
            (false, children) if props.kind() == NodeKind::Unknown => children,
            (false, _) => None,
        };

        Node {
            id: wire.id,
            props,
            children,
            behavior: Behavior {
                tooltip: wire.tooltip,
                animation: wire.animation.and_then(|v| lenient("animation", v)),
                bind: wire.bind.filter(|s| !s.is_empty()),
                visible_if: wire.visible_if.filter(|s| !s.is_empty()),
                on_click: wire.on_click.and_then(|v| lenient("onClick", v)),
                on_hover: wire.on_hover.and_then(|v| lenient("onHover", v)),
                on_blur: wire.on_blur.and_then(|v| lenient("onBlur", v)),
            },
        }
    }
}

fn opaque(type_name: &str, props: Map<String, Value>) -> Props {
    Props::Unknown(UnknownProps {
        type_name: type_name.to_string(),
        props,
    })
}

/// Decode an optional field, dropping it (with a warning) when malformed.
fn lenient<T: serde::de::DeserializeOwned>(field: &str, value: Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            tracing::warn!(field, "ignoring malformed field: {err}");
            None
        }
    }
}
