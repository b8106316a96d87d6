//! Typed component props.
//!
//! Every component kind carries exactly the fields it understands. Props
//! travel on the wire as a plain JSON object next to the node's `type`, so
//! conversion goes through [`Props::to_map`] and [`Props::parse`].
//!
//! Keys a kind does not model are carried in each struct's `extra` map, so
//! they survive edits and save/load untouched.

use crate::errors::{CoreError, Result};
use crate::types::display_string;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

macro_rules! define_kinds {
    ($($kind:ident => $props:ident),+ $(,)?) => {
        /// The closed set of component kinds.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $($kind,)+
            /// A `type` this build does not recognize.
            Unknown,
        }

        impl NodeKind {
            /// Every recognized kind, in palette order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$kind,)+];

            /// Wire name of the kind.
            pub fn name(&self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind),)+
                    NodeKind::Unknown => "Unknown",
                }
            }

            /// Look up a recognized kind by wire name.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|kind| kind.name() == name)
            }
        }

        /// Props of a node, one variant per kind.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Props {
            $($kind($props),)+
            Unknown(UnknownProps),
        }

        impl Props {
            /// Kind these props belong to.
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(Props::$kind(_) => NodeKind::$kind,)+
                    Props::Unknown(_) => NodeKind::Unknown,
                }
            }

            /// Empty props (every optional field unset) for a kind.
            pub fn empty(kind: NodeKind) -> Props {
                match kind {
                    $(NodeKind::$kind => Props::$kind($props::default()),)+
                    NodeKind::Unknown => Props::Unknown(UnknownProps::default()),
                }
            }

            /// Props as an ordered JSON object, unset fields omitted.
            pub fn to_map(&self) -> Map<String, Value> {
                let value = match self {
                    $(Props::$kind(p) => serde_json::to_value(p),)+
                    Props::Unknown(u) => return u.props.clone(),
                };
                match value {
                    Ok(Value::Object(map)) => map,
                    _ => Map::new(),
                }
            }

            /// Parse a JSON object into the props of a recognized kind.
            pub fn parse(kind: NodeKind, map: Map<String, Value>) -> Result<Props> {
                let value = Value::Object(map);
                let parsed = match kind {
                    $(NodeKind::$kind => serde_json::from_value(value).map(Props::$kind),)+
                    NodeKind::Unknown => return Err(CoreError::UnknownKind(kind.name().to_string())),
                };
                parsed.map_err(|source| CoreError::InvalidProps {
                    kind: kind.name().to_string(),
                    source,
                })
            }

            /// Styling class string, if set.
            pub fn class_name(&self) -> Option<&str> {
                match self {
                    $(Props::$kind(p) => p.class_name.as_deref(),)+
                    Props::Unknown(u) => u.props.get("className").and_then(Value::as_str),
                }
            }
        }
    };
}

define_kinds! {
    Container => ContainerProps,
    Card => CardProps,
    Button => ButtonProps,
    DataList => DataListProps,
    Badge => BadgeProps,
    Text => TextProps,
    Input => InputProps,
    Textarea => TextareaProps,
    Image => ImageProps,
    Divider => DividerProps,
    Avatar => AvatarProps,
    Toggle => ToggleProps,
    Checkbox => CheckboxProps,
    Slider => SliderProps,
    Progress => ProgressProps,
    Alert => AlertProps,
    Select => SelectProps,
    Spacer => SpacerProps,
    Rating => RatingProps,
    RadioGroup => RadioGroupProps,
    Breadcrumb => BreadcrumbProps,
    Tag => TagProps,
    Statistic => StatisticProps,
    Quote => QuoteProps,
    Video => VideoProps,
    Map => MapProps,
    Table => TableProps,
    CodeBlock => CodeBlockProps,
}

/// Which runtime slot a bound variable drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSlot {
    /// Boolean checked-state (toggles, checkboxes).
    Checked,
    /// Displayed or controlled value.
    Value,
}

impl NodeKind {
    /// Kinds that may hold children.
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Container | NodeKind::Card)
    }

    /// Prefix used for generated ids, e.g. `datalist`.
    pub fn id_prefix(&self) -> String {
        self.name().to_lowercase()
    }

    pub fn value_slot(&self) -> ValueSlot {
        match self {
            NodeKind::Toggle | NodeKind::Checkbox => ValueSlot::Checked,
            _ => ValueSlot::Value,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Props {
    /// Palette defaults for a newly created node of `kind`.
    pub fn palette(kind: NodeKind) -> Props {
        let class = |s: &str| Some(s.to_string());
        let text = |s: &str| Some(s.to_string());
        let strings = |items: &[&str]| Some(items.iter().map(|s| s.to_string()).collect());

        match kind {
            NodeKind::Container => Props::Container(ContainerProps {
                class_name: class("p-4 border border-dashed border-slate-300 rounded min-h-[100px] bg-slate-50/50"),
                ..Default::default()
            }),
            NodeKind::Card => Props::Card(CardProps {
                class_name: class("p-6 bg-white border border-slate-200 shadow-sm rounded-xl"),
                ..Default::default()
            }),
            NodeKind::Button => Props::Button(ButtonProps {
                label: text("Button"),
                variant: Some(ButtonVariant::Primary),
                ..Default::default()
            }),
            NodeKind::Text => Props::Text(TextProps {
                content: text("Double click to edit text..."),
                class_name: class("text-slate-800"),
                ..Default::default()
            }),
            NodeKind::Badge => Props::Badge(BadgeProps {
                label: text("Badge"),
                variant: Some(BadgeVariant::Default),
                ..Default::default()
            }),
            NodeKind::Input => Props::Input(InputProps {
                placeholder: text("Enter text..."),
                ..Default::default()
            }),
            NodeKind::Textarea => Props::Textarea(TextareaProps {
                placeholder: text("Enter long text..."),
                rows: Some(3),
                ..Default::default()
            }),
            NodeKind::Image => Props::Image(ImageProps {
                class_name: class("w-full h-48 bg-slate-200 object-cover rounded-lg"),
                ..Default::default()
            }),
            NodeKind::DataList => Props::DataList(DataListProps {
                title: text("Dynamic List"),
                description: text("Configure source"),
                items: Vec::new(),
                filter_query: text(""),
                sort_key: Some(SortKey::Title),
                sort_order: Some(SortOrder::None),
                ..Default::default()
            }),
            NodeKind::Divider => Props::Divider(DividerProps {
                class_name: class("my-4"),
                ..Default::default()
            }),
            NodeKind::Avatar => Props::Avatar(AvatarProps {
                initials: text("OR"),
                class_name: class("w-12 h-12"),
                ..Default::default()
            }),
            NodeKind::Toggle => Props::Toggle(ToggleProps {
                label: text("Toggle me"),
                ..Default::default()
            }),
            NodeKind::Checkbox => Props::Checkbox(CheckboxProps {
                label: text("Check me"),
                ..Default::default()
            }),
            NodeKind::Slider => Props::Slider(SliderProps {
                default_value: Some(50.0),
                ..Default::default()
            }),
            NodeKind::Progress => Props::Progress(ProgressProps {
                value: Some(60.0),
                ..Default::default()
            }),
            NodeKind::Alert => Props::Alert(AlertProps {
                title: text("Notification"),
                body: text("Something happened"),
                tone: Some(AlertTone::Info),
                ..Default::default()
            }),
            NodeKind::Select => Props::Select(SelectProps {
                options: strings(&["Option A", "Option B"]),
                ..Default::default()
            }),
            NodeKind::Spacer => Props::Spacer(SpacerProps {
                height: Some(4.0),
                ..Default::default()
            }),
            NodeKind::Rating => Props::Rating(RatingProps {
                max: Some(5),
                ..Default::default()
            }),
            NodeKind::RadioGroup => Props::RadioGroup(RadioGroupProps {
                options: strings(&["Option A", "Option B", "Option C"]),
                ..Default::default()
            }),
            NodeKind::Breadcrumb => Props::Breadcrumb(BreadcrumbProps {
                items: strings(&["Home", "Section", "Page"]),
                ..Default::default()
            }),
            NodeKind::Tag => Props::Tag(TagProps {
                label: text("Tag"),
                ..Default::default()
            }),
            NodeKind::Statistic => Props::Statistic(StatisticProps {
                label: text("Revenue"),
                value: text("$12,450"),
                trend: text("+12%"),
                ..Default::default()
            }),
            NodeKind::Quote => Props::Quote(QuoteProps {
                content: text("Innovation distinguishes between a leader and a follower."),
                author: text("Steve Jobs"),
                ..Default::default()
            }),
            NodeKind::Video => Props::Video(VideoProps {
                src: text(""),
                ..Default::default()
            }),
            NodeKind::Map => Props::Map(MapProps::default()),
            NodeKind::Table => Props::Table(TableProps {
                headers: strings(&["Name", "Role", "Status"]),
                rows: Some(vec![
                    vec!["Alice".into(), "Admin".into(), "Active".into()],
                    vec!["Bob".into(), "User".into(), "Offline".into()],
                ]),
                ..Default::default()
            }),
            NodeKind::CodeBlock => Props::CodeBlock(CodeBlockProps {
                code: text("console.log(\"Hello World\");"),
                ..Default::default()
            }),
            NodeKind::Unknown => Props::Unknown(UnknownProps::default()),
        }
    }

    /// Parse props for a recognized kind from stored data.
    ///
    /// Unlike [`Props::parse`] this never fails: a field whose value does not
    /// fit is dropped back to its default and the rest of the node is kept.
    pub fn parse_lossy(kind: NodeKind, map: Map<String, Value>) -> Props {
        let err = match Props::parse(kind, map.clone()) {
            Ok(props) => return props,
            Err(err) => err,
        };
        tracing::debug!("recovering props field by field: {err}");

        let mut kept = Map::new();
        for (key, value) in map {
            let mut single = Map::new();
            single.insert(key.clone(), value.clone());
            if Props::parse(kind, single).is_ok() {
                kept.insert(key, value);
            } else {
                tracing::warn!(kind = %kind, key = %key, "dropping prop with invalid value");
            }
        }
        Props::parse(kind, kept).unwrap_or_else(|_| Props::empty(kind))
    }

    /// Wire name of the node type; unknown props keep the name they arrived with.
    pub fn type_name(&self) -> &str {
        match self {
            Props::Unknown(u) => &u.type_name,
            other => other.kind().name(),
        }
    }

    /// Shallow-merge `partial` into these props.
    ///
    /// Keys set to `null` are cleared. Keys the kind does not model are kept
    /// in `extra`. A value of the wrong type for a modelled field is an error.
    pub fn merged(&self, partial: &Map<String, Value>) -> Result<Props> {
        let mut map = self.to_map();
        for (key, value) in partial {
            if value.is_null() {
                map.remove(key);
            } else {
                map.insert(key.clone(), value.clone());
            }
        }
        match self {
            Props::Unknown(u) => Ok(Props::Unknown(UnknownProps {
                type_name: u.type_name.clone(),
                props: map,
            })),
            other => Props::parse(other.kind(), map),
        }
    }

    /// Overwrite the kind's own value field with a bound store value.
    ///
    /// Only kinds whose props carry a value field are affected.
    pub fn apply_bound_value(&mut self, value: Option<&Value>) {
        match self {
            Props::Progress(p) => {
                p.value = value.and_then(|v| match v {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse().ok(),
                    _ => None,
                });
            }
            Props::Statistic(p) => {
                p.value = Some(value.map(display_string).unwrap_or_default());
            }
            _ => {}
        }
    }
}

/// Props of a node whose `type` is not recognized, kept verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnknownProps {
    pub type_name: String,
    pub props: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Outline,
    Ghost,
    Danger,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<ButtonVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BadgeVariant {
    Default,
    Success,
    Warning,
    Error,
    Primary,
    Secondary,
    Outline,
    Ghost,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BadgeProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<BadgeVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A row of a DataList.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Title,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    Asc,
    Desc,
    None,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataListProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub items: Vec<ListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<SortKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DataListProps {
    /// Items after applying the filter query and sort settings.
    pub fn visible_items(&self) -> Vec<&ListItem> {
        let query = self
            .filter_query
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();

        let mut items: Vec<&ListItem> = self
            .items
            .iter()
            .filter(|item| query.is_empty() || item_matches(item, &query))
            .collect();

        let order = self.sort_order.unwrap_or(SortOrder::None);
        if order != SortOrder::None {
            let key = self.sort_key.unwrap_or(SortKey::Title);
            items.sort_by(|a, b| {
                let ordering = sort_field(a, key).cmp(&sort_field(b, key));
                if order == SortOrder::Desc {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        items
    }

    /// Placeholder text when nothing is visible.
    pub fn empty_message(&self, visible: usize) -> Option<&'static str> {
        match (visible, self.items.is_empty()) {
            (0, true) => Some("List is empty. Use Orion AI to fill data."),
            (0, false) => Some("No items match your filter."),
            _ => None,
        }
    }
}

fn item_matches(item: &ListItem, query: &str) -> bool {
    let contains = |field: Option<&str>| field.map_or(false, |s| s.to_lowercase().contains(query));
    contains(Some(&item.title)) || contains(item.subtitle.as_deref()) || contains(item.value.as_deref())
}

fn sort_field(item: &ListItem, key: SortKey) -> String {
    match key {
        SortKey::Title => item.title.to_lowercase(),
        SortKey::Value => item.value.as_deref().unwrap_or_default().to_lowercase(),
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextareaProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DividerProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AvatarProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToggleProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckboxProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProgressProps {
    /// Percentage clamped to `0..=100`.
    pub fn percent(&self) -> f64 {
        self.value.unwrap_or(0.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertTone {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body text; stored under `children` on the wire.
    #[serde(rename = "children", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub tone: Option<AlertTone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacerProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RatingProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadioGroupProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BreadcrumbProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TagProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatisticProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeBlockProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: &str, title: &str, value: &str) -> ListItem {
        ListItem {
            id: id.into(),
            title: title.into(),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_kind_names_round_trip() {
        assert_eq!(NodeKind::ALL.len(), 28);
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(NodeKind::from_name("Carousel"), None);
    }

    #[test]
    fn test_only_container_and_card_hold_children() {
        let containers: Vec<_> = NodeKind::ALL.iter().filter(|k| k.is_container()).collect();
        assert_eq!(containers, vec![&NodeKind::Container, &NodeKind::Card]);
    }

    #[test]
    fn test_palette_covers_every_kind() {
        for kind in NodeKind::ALL {
            assert_eq!(Props::palette(*kind).kind(), *kind);
        }
    }

    #[test]
    fn test_to_map_uses_wire_names() {
        let props = Props::palette(NodeKind::Alert);
        let map = props.to_map();
        assert_eq!(map["title"], json!("Notification"));
        assert_eq!(map["children"], json!("Something happened"));
        assert_eq!(map["type"], json!("info"));
        assert!(!map.contains_key("className"));
    }

    #[test]
    fn test_merge_preserves_unspecified_props() {
        let props = Props::palette(NodeKind::Button);
        let mut partial = Map::new();
        partial.insert("label".into(), json!("Go"));
        let merged = props.merged(&partial).unwrap();

        match merged {
            Props::Button(b) => {
                assert_eq!(b.label.as_deref(), Some("Go"));
                assert_eq!(b.variant, Some(ButtonVariant::Primary));
            }
            other => panic!("unexpected props {:?}", other),
        }
    }

    #[test]
    fn test_merge_null_clears_field() {
        let props = Props::palette(NodeKind::Text);
        let mut partial = Map::new();
        partial.insert("className".into(), Value::Null);
        let merged = props.merged(&partial).unwrap();
        assert_eq!(merged.class_name(), None);
    }

    #[test]
    fn test_merge_rejects_ill_typed_value() {
        let props = Props::palette(NodeKind::Textarea);
        let mut partial = Map::new();
        partial.insert("rows".into(), json!("many"));
        assert!(matches!(props.merged(&partial), Err(CoreError::InvalidProps { .. })));
    }

    #[test]
    fn test_data_list_filter_and_sort() {
        let list = DataListProps {
            items: vec![item("1", "Beta", "20"), item("2", "alpha", "10"), item("3", "Gamma", "30")],
            filter_query: Some("A".into()),
            sort_key: Some(SortKey::Title),
            sort_order: Some(SortOrder::Asc),
            ..Default::default()
        };
        let titles: Vec<_> = list.visible_items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "Beta", "Gamma"]);

        let desc = DataListProps {
            sort_key: Some(SortKey::Value),
            sort_order: Some(SortOrder::Desc),
            filter_query: Some("gam".into()),
            ..list
        };
        let ids: Vec<_> = desc.visible_items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn test_data_list_empty_messages() {
        let empty = DataListProps::default();
        assert_eq!(empty.empty_message(0), Some("List is empty. Use Orion AI to fill data."));

        let filtered = DataListProps {
            items: vec![item("1", "One", "1")],
            filter_query: Some("zzz".into()),
            ..Default::default()
        };
        let visible = filtered.visible_items().len();
        assert_eq!(filtered.empty_message(visible), Some("No items match your filter."));
    }

    #[test]
    fn test_apply_bound_value_to_value_fields() {
        let mut progress = Props::palette(NodeKind::Progress);
        progress.apply_bound_value(Some(&json!("75")));
        assert_eq!(
            progress,
            Props::Progress(ProgressProps {
                value: Some(75.0),
                ..Default::default()
            })
        );

        let mut stat = Props::palette(NodeKind::Statistic);
        stat.apply_bound_value(None);
        match stat {
            Props::Statistic(s) => assert_eq!(s.value.as_deref(), Some("")),
            other => panic!("unexpected props {:?}", other),
        }
    }

    #[test]
    fn test_every_inspector_variant_parses() {
        for variant in ["primary", "secondary", "outline", "ghost", "danger", "success", "warning"] {
            for kind in [NodeKind::Button, NodeKind::Badge] {
                let mut map = Map::new();
                map.insert("variant".into(), json!(variant));
                let props = Props::parse(kind, map).unwrap();
                assert_eq!(props.to_map()["variant"], json!(variant));
            }
        }

        let mut partial = Map::new();
        partial.insert("variant".into(), json!("success"));
        match Props::palette(NodeKind::Button).merged(&partial).unwrap() {
            Props::Button(b) => assert_eq!(b.variant, Some(ButtonVariant::Success)),
            other => panic!("unexpected props {:?}", other),
        }
    }

    #[test]
    fn test_unmodelled_keys_survive_edits() {
        let mut map = Map::new();
        map.insert("label".into(), json!("Go"));
        map.insert("data-track".into(), json!("cta"));
        map.insert("size".into(), json!({"w": 2}));
        let props = Props::parse(NodeKind::Button, map).unwrap();

        let mut partial = Map::new();
        partial.insert("label".into(), json!("Ship"));
        let merged = props.merged(&partial).unwrap();
        let out = merged.to_map();
        assert_eq!(out["label"], json!("Ship"));
        assert_eq!(out["data-track"], json!("cta"));
        assert_eq!(out["size"], json!({"w": 2}));

        partial.clear();
        partial.insert("data-track".into(), Value::Null);
        assert!(!merged.merged(&partial).unwrap().to_map().contains_key("data-track"));
    }

    #[test]
    fn test_parse_lossy_drops_only_the_bad_field() {
        let mut map = Map::new();
        map.insert("label".into(), json!("Go"));
        map.insert("variant".into(), json!("sparkly"));
        map.insert("className".into(), json!("w-full"));

        match Props::parse_lossy(NodeKind::Button, map) {
            Props::Button(b) => {
                assert_eq!(b.label.as_deref(), Some("Go"));
                assert_eq!(b.variant, None);
                assert_eq!(b.class_name.as_deref(), Some("w-full"));
            }
            other => panic!("unexpected props {:?}", other),
        }

        let mut rows = Map::new();
        rows.insert("rows".into(), json!("many"));
        rows.insert("placeholder".into(), json!("Notes"));
        let props = Props::parse_lossy(NodeKind::Textarea, rows);
        assert_eq!(props.kind(), NodeKind::Textarea);
        assert_eq!(props.to_map()["placeholder"], json!("Notes"));
    }
}
