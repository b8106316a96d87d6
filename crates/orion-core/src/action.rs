//! Declarative runtime actions attached to node events.

use crate::types::HttpMethod;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A side effect triggered by an interaction.
///
/// Required fields are optional here so that half-configured actions from the
/// editor still load; [`Action::validate`] decides whether one can run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Flip the truthiness of a variable.
    Toggle {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
    /// Overwrite a variable with a literal.
    Set {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
    },
    /// Show a notification.
    Alert {
        #[serde(rename = "value", default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Fetch a URL and optionally store the response body.
    ApiRequest {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        method: Option<HttpMethod>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
}

/// Message shown by an alert with no text.
pub const DEFAULT_ALERT_MESSAGE: &str = "Alert!";

/// An action with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidAction<'a> {
    Toggle { target: &'a str },
    Set { target: &'a str, value: &'a Value },
    Alert { message: &'a str },
    ApiRequest { url: &'a str, method: HttpMethod, target: Option<&'a str> },
}

impl Action {
    pub fn toggle(target: impl Into<String>) -> Self {
        Action::Toggle { target: Some(target.into()) }
    }

    pub fn set(target: impl Into<String>, value: impl Into<Value>) -> Self {
        Action::Set {
            target: Some(target.into()),
            value: Some(value.into()),
        }
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Action::Alert { message: Some(message.into()) }
    }

    pub fn api_request(url: impl Into<String>, method: HttpMethod, target: Option<&str>) -> Self {
        Action::ApiRequest {
            url: Some(url.into()),
            method: Some(method),
            target: target.map(str::to_string),
        }
    }

    /// Wire name of the action type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::Toggle { .. } => "toggle",
            Action::Set { .. } => "set",
            Action::Alert { .. } => "alert",
            Action::ApiRequest { .. } => "apiRequest",
        }
    }

    /// Check required fields. Empty strings count as missing, as does an
    /// empty `set` value.
    pub fn validate(&self) -> Option<ValidAction<'_>> {
        match self {
            Action::Toggle { target } => Some(ValidAction::Toggle { target: present(target)? }),
            Action::Set { target, value } => {
                let value = value.as_ref().filter(|v| !is_blank(v))?;
                Some(ValidAction::Set { target: present(target)?, value })
            }
            Action::Alert { message } => Some(ValidAction::Alert {
                message: present(message).unwrap_or(DEFAULT_ALERT_MESSAGE),
            }),
            Action::ApiRequest { url, method, target } => Some(ValidAction::ApiRequest {
                url: present(url)?,
                method: method.unwrap_or_default(),
                target: present(target),
            }),
        }
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::Null) || value.as_str().map_or(false, str::is_empty)
}
