//! Markup helpers shared by both emitters: attribute serialization, literal
//! formatting, escaping and indented line output.

use crate::generators::Dialect;
use regex::Regex;
use serde_json::{Map, Number, Value};
use std::sync::OnceLock;

/// Prop keys that never become generic attributes.
pub const CONTENT_KEYS: &[&str] = &["children", "items", "content"];

/// Keys that may be written as an attribute name.
const ATTR_NAME: &str = r"^[A-Za-z_:][-A-Za-z0-9_:.]*$";

/// Most stars a Rating exports.
pub const MAX_RATING_STARS: u32 = 10;

/// Attribute list for one element.
#[derive(Debug, Clone)]
pub struct Attrs {
    dialect: Dialect,
    parts: Vec<String>,
}

impl Attrs {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            parts: Vec::new(),
        }
    }

    /// Styling classes under the dialect's attribute name. Blank input is
    /// skipped.
    pub fn class(mut self, classes: &str) -> Self {
        let classes = classes.split_whitespace().collect::<Vec<_>>().join(" ");
        if !classes.is_empty() {
            let key = match self.dialect {
                Dialect::React => "className",
                Dialect::Vue => "class",
            };
            self.parts.push(format!("{key}=\"{}\"", escape_attr(&classes)));
        }
        self
    }

    /// A quoted string attribute.
    pub fn string(mut self, key: &str, value: &str) -> Self {
        self.parts.push(format!("{key}=\"{}\"", escape_attr(value)));
        self
    }

    /// A string attribute, skipped when unset.
    pub fn opt_string(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.string(key, value),
            None => self,
        }
    }

    /// Any value: strings as plain attributes, everything else as an
    /// expression in the dialect's binding syntax.
    pub fn value(mut self, key: &str, value: &Value) -> Self {
        match value {
            Value::String(s) => return self.string(key, s),
            other => {
                let part = match self.dialect {
                    Dialect::React => format!("{key}={{{}}}", js_literal(other, Quote::Double)),
                    Dialect::Vue => format!(":{key}=\"{}\"", js_literal(other, Quote::Single)),
                };
                self.parts.push(part);
            }
        }
        self
    }

    /// A bare boolean attribute such as `controls`.
    pub fn flag(mut self, key: &str) -> Self {
        self.parts.push(key.to_string());
        self
    }

    /// Every prop except content keys and `skip`, in order. `className` is
    /// renamed for the dialect, and so is `defaultValue` for Vue. Keys that
    /// are not valid attribute names are left out.
    pub fn props(mut self, props: &Map<String, Value>, skip: &[&str]) -> Self {
        for (key, value) in props {
            let key = key.as_str();
            if CONTENT_KEYS.contains(&key) || skip.contains(&key) {
                continue;
            }
            if !is_attr_name(key) {
                tracing::debug!(key, "prop name is not a valid attribute; skipped");
                continue;
            }
            let key = match (self.dialect, key) {
                (Dialect::Vue, "defaultValue") => "value",
                (_, key) => key,
            };
            self = match (key, value) {
                ("className", Value::String(classes)) => self.class(classes),
                _ => self.value(key, value),
            };
        }
        self
    }

    /// The attributes with a leading space, or nothing.
    pub fn render(&self) -> String {
        if self.parts.is_empty() {
            String::new()
        } else {
            format!(" {}", self.parts.join(" "))
        }
    }
}

fn is_attr_name(key: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(ATTR_NAME).expect("attribute name pattern compiles"))
        .is_match(key)
}

/// Star glyphs of a Rating: `max` stars, 5 when unset, never more than
/// [`MAX_RATING_STARS`].
pub fn rating_stars(max: Option<u32>) -> String {
    "★".repeat(max.unwrap_or(5).min(MAX_RATING_STARS) as usize)
}

/// String delimiter used inside a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// JSON-compatible, for JSX expression slots.
    Double,
    /// For expressions inside a double-quoted attribute.
    Single,
}

/// Format a value as a JavaScript literal.
///
/// Integral floats print without a fractional part, matching how the
/// editor stores numbers.
pub fn js_literal(value: &Value, quote: Quote) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number(n),
        Value::String(s) => js_string(s, quote),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(|item| js_literal(item, quote)).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let fields: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}:{}", js_string(key, quote), js_literal(value, quote)))
                .collect();
            format!("{{{}}}", fields.join(","))
        }
    }
}

fn number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

fn js_string(s: &str, quote: Quote) -> String {
    match quote {
        Quote::Double => Value::String(s.to_string()).to_string(),
        Quote::Single => {
            let mut out = String::with_capacity(s.len() + 2);
            out.push('\'');
            for c in s.chars() {
                match c {
                    '\\' => out.push_str("\\\\"),
                    '\'' => out.push_str("\\'"),
                    '"' => out.push_str("&quot;"),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    c => out.push(c),
                }
            }
            out.push('\'');
            out
        }
    }
}

/// Format a number the way the editor shows it (`4`, not `4.0`).
pub fn format_number(value: f64) -> String {
    match Number::from_f64(value) {
        Some(n) => number(&n),
        None => "0".to_string(),
    }
}

/// Escape text placed between tags.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

/// Indented line output.
#[derive(Debug)]
pub struct Writer {
    unit: String,
    lines: Vec<String>,
}

impl Writer {
    pub fn new(indent_width: usize) -> Self {
        Self {
            unit: " ".repeat(indent_width),
            lines: Vec::new(),
        }
    }

    pub fn line(&mut self, level: usize, text: impl AsRef<str>) {
        self.lines.push(format!("{}{}", self.unit.repeat(level), text.as_ref()));
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attr_serialization_per_dialect() {
        let mut props = Map::new();
        props.insert("className".into(), json!("p-4  m-2"));
        props.insert("placeholder".into(), json!("Say \"hi\""));
        props.insert("rows".into(), json!(3));
        props.insert("items".into(), json!([1]));
        props.insert("options".into(), json!(["A", "B's"]));

        let react = Attrs::new(Dialect::React).props(&props, &[]).render();
        assert_eq!(
            react,
            r#" className="p-4 m-2" placeholder="Say &quot;hi&quot;" rows={3} options={["A","B's"]}"#
        );

        let vue = Attrs::new(Dialect::Vue).props(&props, &["rows"]).render();
        assert_eq!(vue, r#" class="p-4 m-2" placeholder="Say &quot;hi&quot;" :options="['A','B\'s']""#);
    }

    #[test]
    fn test_invalid_attr_names_are_skipped() {
        let mut props = Map::new();
        props.insert("data-track".into(), json!("cta"));
        props.insert("x\" onload=\"alert(1)".into(), json!("y"));
        props.insert("@click".into(), json!("go"));
        props.insert("1st".into(), json!(1));
        props.insert("aria-label".into(), json!("Close"));

        let react = Attrs::new(Dialect::React).props(&props, &[]).render();
        assert_eq!(react, r#" data-track="cta" aria-label="Close""#);
    }

    #[test]
    fn test_default_value_per_dialect() {
        let mut props = Map::new();
        props.insert("defaultValue".into(), json!("Orion User"));
        assert_eq!(
            Attrs::new(Dialect::React).props(&props, &[]).render(),
            r#" defaultValue="Orion User""#
        );
        assert_eq!(Attrs::new(Dialect::Vue).props(&props, &[]).render(), r#" value="Orion User""#);
    }

    #[test]
    fn test_rating_stars_are_capped() {
        assert_eq!(rating_stars(None), "★★★★★");
        assert_eq!(rating_stars(Some(3)), "★★★");
        assert_eq!(rating_stars(Some(4_000_000_000)).chars().count(), MAX_RATING_STARS as usize);
    }

    #[test]
    fn test_integral_floats_drop_fraction() {
        assert_eq!(js_literal(&json!(50.0), Quote::Double), "50");
        assert_eq!(js_literal(&json!(0.5), Quote::Double), "0.5");
        assert_eq!(format_number(4.0), "4");
    }

    #[test]
    fn test_blank_class_is_skipped() {
        assert_eq!(Attrs::new(Dialect::Vue).class("  ").render(), "");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b {x} & c"), "a &lt; b &#123;x&#125; &amp; c");
    }

    #[test]
    fn test_writer_indents_by_level() {
        let mut w = Writer::new(2);
        w.line(0, "<div>");
        w.line(1, "<span />");
        w.line(0, "</div>");
        assert_eq!(w.finish(), "<div>\n  <span />\n</div>");
    }
}
