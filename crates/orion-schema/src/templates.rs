//! Reusable subtrees and the seed schema.

use crate::engine::{clone_with_ids, id_prefix};
use indexmap::IndexMap;
use orion_core::{
    AvatarProps, BadgeProps, BadgeVariant, ButtonProps, ButtonVariant, CardProps, CheckboxProps,
    ContainerProps, DataListProps, InputProps, ListItem, Node, NodeId, Props, TextProps, ROOT_ID,
};
use std::collections::HashSet;

/// A named subtree that can be inserted into any container.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub schema: Node,
}

impl Template {
    pub fn new(id: impl Into<String>, name: impl Into<String>, schema: Node) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            schema,
        }
    }

    /// Clone the template schema with fresh ids that avoid every id in `tree`.
    pub fn instantiate(&self, tree: &Node) -> Node {
        let taken: HashSet<&NodeId> = tree.ids().into_iter().collect();
        let mut issued: HashSet<NodeId> = HashSet::new();
        clone_with_ids(&self.schema, &mut |node| loop {
            let id = NodeId::generate(&id_prefix(node));
            if !taken.contains(&id) && issued.insert(id.clone()) {
                break id;
            }
        })
    }
}

/// A registry of templates, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: IndexMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            templates: IndexMap::new(),
        }
    }

    /// Registry preloaded with the built-in templates.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(hero_section());
        registry.register(pricing_cards());
        registry.register(contact_form());
        registry
    }

    /// Register a template, replacing any with the same id.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.id.clone(), template);
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Template ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// The dashboard schema shown when the editor starts.
pub fn initial_schema() -> Node {
    let header = container("header-container", "flex justify-between items-center border-b pb-4 mb-4")
        .with_child(text(
            "title-text",
            "Orion Dashboard",
            Some("text-2xl font-bold text-slate-800 tracking-tight"),
        ))
        .with_child(Node::with_props(
            "status-badge",
            Props::Badge(BadgeProps {
                label: Some("Orion Connected".into()),
                variant: Some(BadgeVariant::Success),
                class_name: None,
                ..Default::default()
            }),
        ));

    let profile = card("profile-card", "p-4 text-center space-y-3")
        .with_child(Node::with_props(
            "profile-img",
            Props::Avatar(AvatarProps {
                src: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=Felix".into()),
                alt: Some("User Avatar".into()),
                initials: None,
                class_name: Some("w-24 h-24 mx-auto".into()),
                ..Default::default()
            }),
        ))
        .with_child(Node::with_props(
            "profile-name-input",
            Props::Input(InputProps {
                placeholder: Some("Edit User Name".into()),
                default_value: Some("Orion User".into()),
                class_name: Some("text-center font-semibold".into()),
                ..Default::default()
            }),
        ));

    let market_list = Node::with_props(
        "market-list",
        Props::DataList(DataListProps {
            title: Some("Analytics Data".into()),
            description: Some("Configure items manually".into()),
            items: vec![
                list_item("1", "Phase 1", "Initial setup", "100%", "Done"),
                list_item("2", "Phase 2", "Implementation", "45%", "In Progress"),
            ],
            ..Default::default()
        }),
    );

    let action_bar = container("action-bar", "flex justify-end gap-2 pt-4 border-t border-slate-100")
        .with_child(button("cancel-btn", "Cancel", ButtonVariant::Ghost, None))
        .with_child(button("save-btn", "Save Changes", ButtonVariant::Primary, None));

    let content = container("content-row", "grid grid-cols-1 md:grid-cols-3 gap-6")
        .with_child(container("left-col", "md:col-span-1 space-y-4").with_child(profile))
        .with_child(
            container("right-col", "md:col-span-2 space-y-4")
                .with_child(market_list)
                .with_child(action_bar),
        );

    container(
        ROOT_ID,
        "max-w-4xl mx-auto p-8 space-y-6 bg-white shadow-2xl rounded-2xl min-h-[600px] border border-slate-100",
    )
    .with_child(header)
    .with_child(content)
}

fn hero_section() -> Template {
    let actions = container("h-actions", "flex justify-center gap-4 pt-4")
        .with_child(button("h-btn1", "Get Started", ButtonVariant::Primary, None))
        .with_child(button(
            "h-btn2",
            "View Demo",
            ButtonVariant::Outline,
            Some("bg-transparent text-white border-slate-700"),
        ));

    let schema = container("hero-root", "text-center py-16 px-4 bg-slate-900 rounded-3xl text-white space-y-6")
        .with_child(text("h-title", "Build with Orion", Some("text-4xl font-extrabold tracking-tight")))
        .with_child(text("h-sub", "Drag, drop, and build rapidly.", Some("text-slate-400 max-w-lg mx-auto")))
        .with_child(actions);

    Template::new("tpl_hero", "Hero Section", schema)
}

fn pricing_cards() -> Template {
    let tier = |n: u8, name: &str, price: &str, class: &str, name_class: &str, cta: &str, variant| {
        card(&format!("p-c{n}"), class)
            .with_child(text(&format!("p-t{n}"), name, Some(name_class)))
            .with_child(text(&format!("p-pr{n}"), price, Some("text-3xl font-bold")))
            .with_child(button(&format!("p-btn{n}"), cta, variant, None))
    };

    let schema = container("price-root", "grid grid-cols-1 md:grid-cols-3 gap-4")
        .with_child(tier(1, "Basic", "$0/mo", "p-6 space-y-4", "font-bold text-lg", "Select", ButtonVariant::Outline))
        .with_child(tier(
            2,
            "Pro",
            "$29/mo",
            "p-6 bg-slate-900 text-white space-y-4 scale-105",
            "font-bold text-lg text-indigo-400",
            "Select",
            ButtonVariant::Primary,
        ))
        .with_child(tier(3, "Enterprise", "Custom", "p-6 space-y-4", "font-bold text-lg", "Contact", ButtonVariant::Outline));

    Template::new("tpl_pricing", "Pricing Cards", schema)
}

fn contact_form() -> Template {
    let input = |id: &str, placeholder: &str| {
        Node::with_props(
            id,
            Props::Input(InputProps {
                placeholder: Some(placeholder.into()),
                ..Default::default()
            }),
        )
    };

    let schema = card("form-root", "max-w-md mx-auto p-6 space-y-4")
        .with_child(text("f-title", "Contact Us", Some("text-xl font-bold mb-2")))
        .with_child(input("f-in1", "Your Name"))
        .with_child(input("f-in2", "Email Address"))
        .with_child(Node::with_props(
            "f-chk",
            Props::Checkbox(CheckboxProps {
                label: Some("Subscribe to newsletter".into()),
                class_name: None,
                ..Default::default()
            }),
        ))
        .with_child(button("f-btn", "Send Message", ButtonVariant::Primary, Some("w-full")));

    Template::new("tpl_form", "Contact Form", schema)
}

fn container(id: &str, class: &str) -> Node {
    Node::with_props(
        id,
        Props::Container(ContainerProps {
            class_name: Some(class.into()),
            ..Default::default()
        }),
    )
}

fn card(id: &str, class: &str) -> Node {
    Node::with_props(
        id,
        Props::Card(CardProps {
            class_name: Some(class.into()),
            ..Default::default()
        }),
    )
}

fn text(id: &str, content: &str, class: Option<&str>) -> Node {
    Node::with_props(
        id,
        Props::Text(TextProps {
            content: Some(content.into()),
            class_name: class.map(str::to_string),
            ..Default::default()
        }),
    )
}

fn button(id: &str, label: &str, variant: ButtonVariant, class: Option<&str>) -> Node {
    Node::with_props(
        id,
        Props::Button(ButtonProps {
            label: Some(label.into()),
            variant: Some(variant),
            class_name: class.map(str::to_string),
            ..Default::default()
        }),
    )
}

fn list_item(id: &str, title: &str, subtitle: &str, value: &str, badge: &str) -> ListItem {
    ListItem {
        id: id.into(),
        title: title.into(),
        subtitle: Some(subtitle.into()),
        value: Some(value.into()),
        badge: Some(badge.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orion_core::NodeKind;

    #[test]
    fn test_builtin_templates() {
        let registry = TemplateRegistry::builtin();
        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids, vec!["tpl_hero", "tpl_pricing", "tpl_form"]);
        assert_eq!(registry.get("tpl_form").map(|t| t.schema.kind()), Some(NodeKind::Card));
        assert!(!registry.contains("tpl_missing"));
    }

    #[test]
    fn test_template_ids_are_unique() {
        for template in TemplateRegistry::builtin().iter() {
            let ids = template.schema.ids();
            let unique: HashSet<_> = ids.iter().collect();
            assert_eq!(ids.len(), unique.len(), "duplicate id in {}", template.name);
        }
    }

    #[test]
    fn test_initial_schema_shape() {
        let tree = initial_schema();
        assert_eq!(tree.id, ROOT_ID);
        assert_eq!(tree.len(), 14);
        let list = crate::engine::find(&tree, "market-list").unwrap();
        match &list.props {
            Props::DataList(p) => assert_eq!(p.items.len(), 2),
            other => panic!("unexpected props {:?}", other),
        }
    }

    #[test]
    fn test_instantiate_avoids_existing_ids() {
        let tree = initial_schema();
        let registry = TemplateRegistry::builtin();
        let hero = registry.get("tpl_hero").unwrap();
        let instance = hero.instantiate(&tree);

        assert_eq!(instance.len(), hero.schema.len());
        let existing: HashSet<_> = tree.ids().into_iter().collect();
        assert!(instance.ids().iter().all(|id| !existing.contains(id)));
        assert!(instance.id.as_str().starts_with("container_"));
    }
}
