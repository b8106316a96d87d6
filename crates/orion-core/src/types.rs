//! Core value types for Orion schemas.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Id of the root container in the seed schema.
pub const ROOT_ID: &str = "root-container";

/// Number of random characters in a generated id suffix.
const ID_SUFFIX_LEN: usize = 9;

/// A node identifier, unique within a tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Generate a fresh id of the form `<prefix>_<9 random chars>`.
    pub fn generate(prefix: &str) -> Self {
        NodeId(format!("{}_{}", prefix, random_suffix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Random lowercase alphanumeric suffix used for node and project ids.
pub fn random_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..ID_SUFFIX_LEN].to_string()
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Entry animation preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Animation {
    #[default]
    None,
    Fade,
    SlideUp,
    SlideDown,
    Bounce,
    Pulse,
    Spin,
}

impl Animation {
    /// Utility class applied by the render surface.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Fade => Some("animate-[fadeIn_0.5s_ease-out]"),
            Self::SlideUp => Some("animate-[slideUp_0.5s_ease-out]"),
            Self::SlideDown => Some("animate-[slideDown_0.5s_ease-out]"),
            Self::Bounce => Some("animate-bounce"),
            Self::Pulse => Some("animate-pulse"),
            Self::Spin => Some("animate-spin"),
        }
    }
}

/// HTTP method for `apiRequest` actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Truthiness of an optional store value.
///
/// Undefined, `null`, `false`, `0`, `NaN` and `""` are falsy; everything else,
/// including empty arrays and objects, is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Text form of a store value as shown in a bound text slot.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generated_ids_have_prefix() {
        let id = NodeId::generate("button");
        assert!(id.as_str().starts_with("button_"));
        assert_eq!(id.as_str().len(), "button_".len() + ID_SUFFIX_LEN);
        assert_ne!(id, NodeId::generate("button"));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&Value::Null)));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(is_truthy(Some(&json!("0"))));
        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!(3))));
        assert!(is_truthy(Some(&json!([]))));
        assert!(is_truthy(Some(&json!({}))));
    }

    #[test]
    fn test_display_string() {
        assert_eq!(display_string(&json!("hi")), "hi");
        assert_eq!(display_string(&json!(5)), "5");
        assert_eq!(display_string(&Value::Null), "");
    }

    #[test]
    fn test_http_method_wire_names() {
        let method: HttpMethod = serde_json::from_str("\"POST\"").unwrap();
        assert_eq!(method, HttpMethod::Post);
        assert_eq!(HttpMethod::default().as_str(), "GET");
    }
}
