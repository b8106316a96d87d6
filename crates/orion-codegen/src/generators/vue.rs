//! Vue single-file component generator.

use super::{CodeGenerator, Dialect, EmitOptions};
use crate::classes::{self, join};
use crate::markup::{escape_text, format_number, js_literal, rating_stars, Attrs, Quote, Writer};
use orion_core::{Node, Props};
use serde_json::Value;

/// Vue SFC generator. The template is static; no reactive state is emitted.
#[derive(Debug, Clone, Default)]
pub struct VueGenerator {
    options: EmitOptions,
}

impl VueGenerator {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    fn emit(&self, node: &Node, level: usize, out: &mut Writer) {
        match &node.props {
            Props::Container(p) => self.emit_box(node, cls(&p.class_name), level, out),
            Props::Card(p) => self.emit_box(node, cls(&p.class_name), level, out),
            Props::Button(p) => {
                let class = join(&[cls(&p.class_name), classes::button(p.variant)]);
                out.line(level, format!("<button{}>{}</button>", attrs().class(&class).render(), text(&p.label)));
            }
            Props::Text(p) => {
                out.line(level, format!("<div{}>{}</div>", attrs().class(cls(&p.class_name)).render(), text(&p.content)));
            }
            Props::Badge(p) => {
                let class = join(&[classes::badge(p.variant), cls(&p.class_name)]);
                out.line(level, format!("<span{}>{}</span>", attrs().class(&class).render(), text(&p.label)));
            }
            Props::DataList(p) => {
                let items = node.props.to_map().get("items").cloned().unwrap_or(Value::Array(Vec::new()));
                let list = attrs().class(&join(&[cls(&p.class_name), classes::LIST])).render();
                out.line(level, format!("<div{list}>"));
                out.line(level + 1, format!("<div{}>{}</div>", attrs().class(classes::LIST_HEADER).render(), text(&p.title)));
                out.line(
                    level + 1,
                    format!(
                        "<div v-for=\"item in {}\" :key=\"item.id\"{}>",
                        js_literal(&items, Quote::Single),
                        attrs().class(classes::LIST_ROW).render()
                    ),
                );
                out.line(level + 2, "<span>{{ item.title }}</span>");
                out.line(level + 2, "<span class=\"font-mono\">{{ item.value }}</span>");
                out.line(level + 1, "</div>");
                out.line(level, "</div>");
            }
            Props::Input(_) | Props::Image(_) => {
                let tag = if matches!(node.props, Props::Input(_)) { "input" } else { "img" };
                out.line(level, format!("<{tag}{} />", attrs().props(&node.props.to_map(), &[]).render()));
            }
            Props::Textarea(_) => {
                out.line(level, format!("<textarea{}></textarea>", attrs().props(&node.props.to_map(), &[]).render()));
            }
            Props::Divider(p) => {
                out.line(level, format!("<hr{} />", attrs().class(&join(&[classes::DIVIDER, cls(&p.class_name)])).render()));
            }
            Props::Avatar(p) => match p.src.as_deref().filter(|s| !s.is_empty()) {
                Some(src) => {
                    let a = attrs()
                        .string("src", src)
                        .string("alt", p.alt.as_deref().unwrap_or_default())
                        .class(&join(&[classes::AVATAR_IMAGE, cls(&p.class_name)]));
                    out.line(level, format!("<img{} />", a.render()));
                }
                None => {
                    let a = attrs().class(&join(&[classes::AVATAR_INITIALS, cls(&p.class_name)]));
                    out.line(level, format!("<div{}>{}</div>", a.render(), text(&p.initials)));
                }
            },
            Props::Toggle(p) => {
                out.line(level, format!("<label{}>", attrs().class(&join(&[classes::TOGGLE, cls(&p.class_name)])).render()));
                out.line(level + 1, "<input type=\"checkbox\" role=\"switch\" />");
                out.line(level + 1, format!("<span>{}</span>", text(&p.label)));
                out.line(level, "</label>");
            }
            Props::Checkbox(p) => {
                out.line(level, format!("<label{}>", attrs().class(&join(&[classes::CHECKBOX, cls(&p.class_name)])).render()));
                out.line(level + 1, "<input type=\"checkbox\" />");
                out.line(level + 1, format!("<span>{}</span>", text(&p.label)));
                out.line(level, "</label>");
            }
            Props::Slider(p) => {
                let a = attrs()
                    .string("type", "range")
                    .value("min", &Value::from(p.min.unwrap_or(0.0)))
                    .value("max", &Value::from(p.max.unwrap_or(100.0)))
                    .value("value", &Value::from(p.default_value.unwrap_or(50.0)))
                    .class(cls(&p.class_name));
                out.line(level, format!("<input{} />", a.render()));
            }
            Props::Progress(p) => {
                out.line(level, format!("<div{}>", attrs().class(&join(&[classes::PROGRESS_TRACK, cls(&p.class_name)])).render()));
                let bar = attrs()
                    .class(classes::PROGRESS_BAR)
                    .string("style", &format!("width: {}%", format_number(p.percent())));
                out.line(level + 1, format!("<div{}></div>", bar.render()));
                out.line(level, "</div>");
            }
            Props::Alert(p) => {
                let a = attrs().string("role", "alert").class(&join(&[classes::alert(p.tone), cls(&p.class_name)]));
                out.line(level, format!("<div{}>", a.render()));
                if let Some(title) = &p.title {
                    out.line(level + 1, format!("<strong class=\"block font-semibold\">{}</strong>", escape_text(title)));
                }
                if let Some(body) = &p.body {
                    out.line(level + 1, format!("<p>{}</p>", escape_text(body)));
                }
                out.line(level, "</div>");
            }
            Props::Select(p) => {
                out.line(level, format!("<select{}>", attrs().class(cls(&p.class_name)).render()));
                for option in p.options.as_deref().unwrap_or_default() {
                    out.line(level + 1, format!("<option>{}</option>", escape_text(option)));
                }
                out.line(level, "</select>");
            }
            Props::Spacer(p) => {
                let height = format!("h-{}", format_number(p.height.unwrap_or(4.0)));
                out.line(level, format!("<div{}></div>", attrs().class(&join(&[&height, cls(&p.class_name)])).render()));
            }
            Props::Rating(p) => {
                let stars = rating_stars(p.max);
                out.line(level, format!("<div{}>{stars}</div>", attrs().class(&join(&[classes::RATING, cls(&p.class_name)])).render()));
            }
            Props::RadioGroup(p) => {
                let group = attrs().string("role", "radiogroup").class(&join(&[classes::RADIO_GROUP, cls(&p.class_name)]));
                out.line(level, format!("<div{}>", group.render()));
                for option in p.options.as_deref().unwrap_or_default() {
                    let input = attrs().string("type", "radio").string("name", node.id.as_str()).string("value", option);
                    out.line(
                        level + 1,
                        format!(
                            "<label class=\"{}\"><input{} /> {}</label>",
                            classes::CHECKBOX,
                            input.render(),
                            escape_text(option)
                        ),
                    );
                }
                out.line(level, "</div>");
            }
            Props::Breadcrumb(p) => {
                let items = p.items.as_deref().unwrap_or_default();
                out.line(level, format!("<nav{}>", attrs().string("aria-label", "Breadcrumb").class(cls(&p.class_name)).render()));
                out.line(level + 1, format!("<ol{}>", attrs().class(classes::BREADCRUMB).render()));
                for (index, item) in items.iter().enumerate() {
                    if index + 1 == items.len() {
                        let current = attrs().string("aria-current", "page").class(classes::BREADCRUMB_CURRENT);
                        out.line(level + 2, format!("<li{}>{}</li>", current.render(), escape_text(item)));
                    } else {
                        out.line(level + 2, format!("<li>{}</li>", escape_text(item)));
                    }
                }
                out.line(level + 1, "</ol>");
                out.line(level, "</nav>");
            }
            Props::Tag(p) => {
                out.line(level, format!("<span{}>{}</span>", attrs().class(&join(&[classes::TAG, cls(&p.class_name)])).render(), text(&p.label)));
            }
            Props::Statistic(p) => {
                out.line(level, format!("<div{}>", attrs().class(cls(&p.class_name)).render()));
                out.line(level + 1, format!("<div{}>{}</div>", attrs().class(classes::STAT_LABEL).render(), text(&p.label)));
                out.line(level + 1, format!("<div{}>{}</div>", attrs().class(classes::STAT_VALUE).render(), text(&p.value)));
                if let Some(trend) = &p.trend {
                    out.line(level + 1, format!("<div{}>{}</div>", attrs().class(classes::STAT_TREND).render(), escape_text(trend)));
                }
                out.line(level, "</div>");
            }
            Props::Quote(p) => {
                out.line(level, format!("<blockquote{}>", attrs().class(&join(&[classes::QUOTE, cls(&p.class_name)])).render()));
                out.line(level + 1, format!("<p>{}</p>", text(&p.content)));
                if let Some(author) = &p.author {
                    out.line(level + 1, format!("<cite{}>{}</cite>", attrs().class(classes::QUOTE_AUTHOR).render(), escape_text(author)));
                }
                out.line(level, "</blockquote>");
            }
            Props::Video(p) => {
                let a = attrs()
                    .opt_string("src", p.src.as_deref().filter(|s| !s.is_empty()))
                    .flag("controls")
                    .class(&join(&[classes::VIDEO, cls(&p.class_name)]));
                out.line(level, format!("<video{}></video>", a.render()));
            }
            Props::Map(p) => {
                out.line(level, format!("<div{}>Map</div>", attrs().class(&join(&[classes::MAP, cls(&p.class_name)])).render()));
            }
            Props::Table(p) => {
                out.line(level, format!("<table{}>", attrs().class(&join(&[classes::TABLE, cls(&p.class_name)])).render()));
                out.line(level + 1, "<thead>");
                out.line(level + 2, "<tr>");
                for header in p.headers.as_deref().unwrap_or_default() {
                    out.line(level + 3, format!("<th>{}</th>", escape_text(header)));
                }
                out.line(level + 2, "</tr>");
                out.line(level + 1, "</thead>");
                out.line(level + 1, "<tbody>");
                for row in p.rows.as_deref().unwrap_or_default() {
                    out.line(level + 2, "<tr>");
                    for cell in row {
                        out.line(level + 3, format!("<td>{}</td>", escape_text(cell)));
                    }
                    out.line(level + 2, "</tr>");
                }
                out.line(level + 1, "</tbody>");
                out.line(level, "</table>");
            }
            Props::CodeBlock(p) => {
                // v-pre keeps mustaches in the sample code from being compiled.
                let code = escape_text(p.code.as_deref().unwrap_or_default());
                out.line(
                    level,
                    format!(
                        "<pre{} v-pre><code>{code}</code></pre>",
                        attrs().class(&join(&[classes::CODE, cls(&p.class_name)])).render()
                    ),
                );
            }
            Props::Unknown(u) => {
                tracing::warn!(id = %node.id, kind = %u.type_name, "exporting placeholder for unknown kind");
                let a = attrs()
                    .string("data-unknown-component", &u.type_name)
                    .props(&u.props, &["label", "title", "className"])
                    .class(&join(&[classes::UNKNOWN, node.props.class_name().unwrap_or_default()]));
                let label = ["label", "content", "title"]
                    .iter()
                    .find_map(|key| u.props.get(*key).and_then(Value::as_str))
                    .unwrap_or(&u.type_name);
                if node.children().is_empty() {
                    out.line(level, format!("<div{}>{}</div>", a.render(), escape_text(label)));
                } else {
                    out.line(level, format!("<div{}>", a.render()));
                    out.line(level + 1, format!("<span>{}</span>", escape_text(label)));
                    for child in node.children() {
                        self.emit(child, level + 1, out);
                    }
                    out.line(level, "</div>");
                }
            }
        }
    }

    fn emit_box(&self, node: &Node, class: &str, level: usize, out: &mut Writer) {
        let a = attrs().class(class).render();
        if node.children().is_empty() {
            out.line(level, format!("<div{a}></div>"));
            return;
        }
        out.line(level, format!("<div{a}>"));
        for child in node.children() {
            self.emit(child, level + 1, out);
        }
        out.line(level, "</div>");
    }
}

impl CodeGenerator for VueGenerator {
    fn dialect(&self) -> Dialect {
        Dialect::Vue
    }

    fn generate_fragment(&self, node: &Node, level: usize) -> String {
        let mut out = Writer::new(self.options.indent_width);
        self.emit(node, level, &mut out);
        out.finish()
    }

    fn generate_document(&self, tree: &Node) -> String {
        let mut lines = Vec::new();
        lines.push("<template>".to_string());
        lines.push(self.generate_fragment(tree, 1));
        lines.push("</template>".to_string());
        lines.push(String::new());
        lines.push("<script setup>".to_string());
        lines.push("// No reactive state needed for static export".to_string());
        lines.push("</script>".to_string());
        lines.join("\n")
    }
}

fn attrs() -> Attrs {
    Attrs::new(Dialect::Vue)
}

fn cls(class_name: &Option<String>) -> &str {
    class_name.as_deref().unwrap_or_default()
}

fn text(value: &Option<String>) -> String {
    escape_text(value.as_deref().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orion_core::{ListItem, NodeKind};

    fn generate(node: &Node) -> String {
        VueGenerator::default().generate_fragment(node, 0)
    }

    #[test]
    fn test_empty_container_has_closing_tag() {
        let node = Node::with_props("c", Props::Container(Default::default()));
        assert_eq!(generate(&node), "<div></div>");
    }

    #[test]
    fn test_button_uses_class_attribute() {
        let node = Node::with_props("b", Props::palette(NodeKind::Button));
        assert_eq!(
            generate(&node),
            r#"<button class="px-4 py-2 rounded-lg bg-blue-600 text-white">Button</button>"#
        );
    }

    #[test]
    fn test_numeric_attrs_are_bound() {
        let node = Node::with_props("t", Props::palette(NodeKind::Textarea));
        assert_eq!(generate(&node), r#"<textarea placeholder="Enter long text..." :rows="3"></textarea>"#);
    }

    #[test]
    fn test_default_value_binds_as_value() {
        let mut props = Props::palette(NodeKind::Input);
        if let Props::Input(input) = &mut props {
            input.default_value = Some("Orion".into());
        }
        let code = generate(&Node::with_props("i", props));
        assert!(code.contains(r#"value="Orion""#), "{code}");
        assert!(!code.contains("defaultValue"), "{code}");
    }

    #[test]
    fn test_data_list_iterates_items() {
        let mut props = Props::palette(NodeKind::DataList);
        if let Props::DataList(list) = &mut props {
            list.items.push(ListItem {
                id: "1".into(),
                title: "Mars".into(),
                ..Default::default()
            });
        }
        let code = generate(&Node::with_props("l", props));
        assert!(code.contains(r#"<div v-for="item in [{'id':'1','title':'Mars'}]" :key="item.id" class="p-3 border-b last:border-0 flex justify-between">"#));
        assert!(code.contains("<span>{{ item.title }}</span>"));
    }

    #[test]
    fn test_progress_static_style() {
        let node = Node::with_props("p", Props::palette(NodeKind::Progress));
        assert!(generate(&node).contains(r#"style="width: 60%""#));
    }

    #[test]
    fn test_document_wrapper() {
        let node = Node::with_props("c", Props::Container(Default::default()));
        assert_eq!(
            VueGenerator::default().generate_document(&node),
            "<template>\n  <div></div>\n</template>\n\n<script setup>\n// No reactive state needed for static export\n</script>"
        );
    }
}
