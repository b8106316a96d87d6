//! Text outline of a rendered tree for `orion preview`.

use orion_core::{display_string, Props};
use orion_runtime::{BoundValue, RenderNode};

/// One line per rendered node, indented two spaces per level.
pub fn outline(root: &RenderNode) -> String {
    let mut lines = Vec::new();
    walk(root, 0, &mut lines);
    lines.join("\n")
}

fn walk(node: &RenderNode, depth: usize, lines: &mut Vec<String>) {
    let mut line = format!("{}{} #{}", "  ".repeat(depth), node.props.type_name(), node.id);
    if let Some(text) = caption(node) {
        line.push_str(&format!(" \"{text}\""));
    }
    match &node.bound {
        Some(BoundValue::Checked(checked)) => line.push_str(&format!(" [checked={checked}]")),
        Some(BoundValue::Value(value)) => line.push_str(&format!(" [value={}]", display_string(value))),
        None => {}
    }
    if let Some(list) = &node.list {
        match list.empty_message {
            Some(message) => line.push_str(&format!(" ({message})")),
            None => line.push_str(&format!(" ({} items)", list.items.len())),
        }
    }
    if let Some(tooltip) = &node.tooltip {
        line.push_str(&format!(" tooltip=\"{tooltip}\""));
    }
    if node.selected {
        line.push_str("  <- selected");
    }
    lines.push(line);
    for child in &node.children {
        walk(child, depth + 1, lines);
    }
}

fn caption(node: &RenderNode) -> Option<String> {
    if let Some(placeholder) = &node.placeholder {
        return Some(placeholder.clone());
    }
    match &node.props {
        Props::Button(p) => p.label.clone(),
        Props::Badge(p) => p.label.clone(),
        Props::Tag(p) => p.label.clone(),
        Props::Toggle(p) => p.label.clone(),
        Props::Checkbox(p) => p.label.clone(),
        Props::Text(p) => p.content.clone(),
        Props::Quote(p) => p.content.clone(),
        Props::DataList(p) => p.title.clone(),
        Props::Alert(p) => p.title.clone(),
        Props::Statistic(p) => p.value.clone(),
        Props::Input(p) => p.placeholder.clone(),
        _ => None,
    }
}
