//! Recovers a JSON object from free-form model output.
//!
//! Order: whole text → fenced code block (optional `json` tag) → first `{` to last `}`.
//! No retries here; a failure aborts whatever pipeline asked for the parse.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::llm_client::LlmError;

/// Characters of raw output carried in parse errors.
const EXCERPT_CHARS: usize = 200;

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("valid regex"));

static BRACE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// Extracts the JSON payload from a model response.
pub fn extract_json(text: &str) -> Result<Value, LlmError> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok(value);
    }

    if let Some(inner) = FENCED_BLOCK.captures(text).and_then(|c| c.get(1)) {
        if let Ok(value) = serde_json::from_str::<Value>(inner.as_str()) {
            return Ok(value);
        }
    }

    if let Some(span) = BRACE_SPAN.find(text) {
        if let Ok(value) = serde_json::from_str::<Value>(span.as_str()) {
            return Ok(value);
        }
    }

    Err(LlmError::UnparsableResponse {
        excerpt: excerpt(text),
    })
}

/// Extracts JSON and deserializes it into `T`. Structs used here should
/// default every field so missing keys fall back instead of failing.
pub fn parse_response<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let value = extract_json(text)?;
    serde_json::from_value(value).map_err(|e| LlmError::ResponseShape {
        message: e.to_string(),
        excerpt: excerpt(text),
    })
}

/// First 200 characters of `text`, cut on a char boundary.
pub fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}
