//! The prompt under analysis
//!
//! A `Prompt` is trimmed exactly once, when it is accepted, and is immutable afterwards.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Reasons a submitted prompt is rejected before any analysis runs
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidPromptError {
    #[error("Request body is not valid JSON. Send JSON: {{ \"prompt\": \"...\" }}")]
    MalformedBody,

    #[error("Missing prompt in request body. Send JSON: {{ \"prompt\": \"...\" }}")]
    Missing,

    #[error("Prompt must be a string, got {0}")]
    NotText(&'static str),

    #[error("Prompt is empty after trimming whitespace")]
    Empty,
}

/// Raw user-submitted prompt text, trimmed at entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Accept a prompt, trimming surrounding whitespace.
    ///
    /// Returns [`InvalidPromptError::Empty`] when nothing is left after trimming.
    pub fn new(raw: &str) -> Result<Self, InvalidPromptError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidPromptError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Parse a `{ "prompt": "..." }` request body
    pub fn from_request_body(body: &[u8]) -> Result<Self, InvalidPromptError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| InvalidPromptError::MalformedBody)?;

        match value.get("prompt") {
            None | Some(Value::Null) => Err(InvalidPromptError::Missing),
            Some(Value::String(text)) => Self::new(text),
            Some(other) => Err(InvalidPromptError::NotText(json_type_name(other))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
