//! AI-generated sample data for DataList nodes.

use crate::error::GenerationError;
use async_trait::async_trait;
use orion_core::ListItem;
use serde_json::{json, Value};
use std::time::Duration;

/// Produces list items from a free-text request.
#[async_trait(?Send)]
pub trait ContentGenerator {
    async fn generate_list_items(&self, prompt: &str) -> Result<Vec<ListItem>, GenerationError>;
}

/// Options for [`GeminiGenerator`].
#[derive(Debug, Clone)]
pub struct GeminiOptions {
    /// API base, up to and including the version segment.
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GeminiOptions {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-pro-preview".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl GeminiOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// [`ContentGenerator`] calling the Gemini `generateContent` endpoint with a
/// structured JSON response schema.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    options: GeminiOptions,
}

impl GeminiGenerator {
    pub fn new(api_key: impl Into<String>, options: GeminiOptions) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|err| failed("building http client", err))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            options,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.options.endpoint.trim_end_matches('/'),
            self.options.model
        )
    }
}

#[async_trait(?Send)]
impl ContentGenerator for GeminiGenerator {
    async fn generate_list_items(&self, prompt: &str) -> Result<Vec<ListItem>, GenerationError> {
        tracing::debug!(model = %self.options.model, "requesting list items");
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(prompt))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| failed("calling model", err))?;
        let reply: Value = response.json().await.map_err(|err| failed("reading reply", err))?;
        let items = parse_reply(&reply)?;
        tracing::info!(count = items.len(), "generated list items");
        Ok(items)
    }
}

/// Instructions sent to the model around the user's request.
pub fn instructions(user_prompt: &str) -> String {
    format!(
        "You are Orion AI, a specialized Data Generator for a UI library.\n\n\
         User Request: \"{user_prompt}\"\n\n\
         Your task is to generate a JSON array of items suitable for a dashboard list component.\n\n\
         Each item must strictly follow this schema:\n\
         - id: string (unique)\n\
         - title: string (main text)\n\
         - subtitle: string (secondary text, short description)\n\
         - value: string (numeric value, price, or metric)\n\
         - badge: string (short status label like 'High', 'Buy', '+5%')\n\n\
         Generate 3 to 6 items.\n\
         Ensure the data is realistic and strictly matches the user's request."
    )
}

/// Request body asking for a JSON array of list items.
pub fn request_body(user_prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": instructions(user_prompt) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "title": { "type": "STRING" },
                        "subtitle": { "type": "STRING" },
                        "value": { "type": "STRING" },
                        "badge": { "type": "STRING" }
                    },
                    "required": ["id", "title"]
                }
            }
        }
    })
}

/// Extract the item array from a `generateContent` reply.
pub fn parse_reply(reply: &Value) -> Result<Vec<ListItem>, GenerationError> {
    let text = reply
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| failed("reading reply", "no text in model reply"))?;
    serde_json::from_str(text).map_err(|err| failed("parsing items", err))
}

fn failed(stage: &str, err: impl std::fmt::Display) -> GenerationError {
    tracing::warn!(stage, "list generation failed: {err}");
    GenerationError
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(text: &str) -> Value {
        json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
    }

    #[test]
    fn test_request_carries_prompt_and_schema() {
        let body = request_body("top 5 stocks");
        let text = body.pointer("/contents/0/parts/0/text").and_then(Value::as_str).unwrap();
        assert!(text.contains("User Request: \"top 5 stocks\""));
        assert!(text.contains("Generate 3 to 6 items."));
        assert_eq!(
            body.pointer("/generationConfig/responseSchema/items/required"),
            Some(&json!(["id", "title"]))
        );
    }

    #[test]
    fn test_parse_reply_items() {
        let items = parse_reply(&reply(
            r#"[{"id":"1","title":"AAPL","value":"$190","badge":"Buy"},{"id":"2","title":"MSFT"}]"#,
        ))
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].badge.as_deref(), Some("Buy"));
        assert_eq!(items[1].subtitle, None);
    }

    #[test]
    fn test_parse_reply_failures_are_generic() {
        assert_eq!(parse_reply(&json!({})), Err(GenerationError));
        assert_eq!(parse_reply(&reply("not json")), Err(GenerationError));
        assert_eq!(parse_reply(&reply(r#"[{"title":"no id"}]"#)), Err(GenerationError));
    }

    #[test]
    fn test_url_joins_endpoint_and_model() {
        let generator = GeminiGenerator::new(
            "key",
            GeminiOptions::new().with_endpoint("http://localhost:9/v1/").with_model("m"),
        )
        .unwrap();
        assert_eq!(generator.url(), "http://localhost:9/v1/models/m:generateContent");
    }
}
