use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::Template;

/// Decoded JSON body of a 2xx reply.
///
/// Deployments disagree on the success field: the analysis server answers with
/// `result` (or `description`), the compositing server with `ad_url` or
/// `secure_url`. All of them are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerateResponse {
    body: Value,
}

impl GenerateResponse {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Application-level failure reported inside the body, if any.
    pub fn error_message(&self) -> Option<String> {
        self.field("error").map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Picks the first populated success field, falling back to the whole body.
    pub fn content(&self) -> AdContent {
        for key in ["result", "description"] {
            if let Some(text) = self.string_field(key) {
                return AdContent::Text(text);
            }
        }
        for key in ["ad_url", "secure_url"] {
            if let Some(url) = self.string_field(key) {
                return AdContent::Url(url);
            }
        }
        AdContent::Raw(self.body.to_string())
    }

    // Null, false, "" and 0 count as absent, like the browser clients treat them.
    fn field(&self, key: &str) -> Option<&Value> {
        self.body.get(key).filter(|value| match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
            _ => true,
        })
    }

    fn string_field(&self, key: &str) -> Option<String> {
        self.field(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AdContent {
    /// Generated copy or analysis text.
    Text(String),
    /// Location of a rendered ad image.
    Url(String),
    /// Body without a recognised field, serialized back to JSON.
    Raw(String),
}

impl AdContent {
    pub fn as_str(&self) -> &str {
        match self {
            AdContent::Text(s) | AdContent::Url(s) | AdContent::Raw(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            AdContent::Text(s) | AdContent::Url(s) | AdContent::Raw(s) => s,
        }
    }
}

impl fmt::Display for AdContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedAd {
    pub request_id: String,
    pub template: Template,
    pub content: AdContent,
    pub elapsed: Duration,
}
