use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::OnceLock;

use crate::errors::GenerationError;

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)\A```(?:json)?\s*\n?(.*?)\n?\s*```\z").expect("fence pattern is valid")
    })
}

/// Returns the interior of a single fenced block spanning the whole text,
/// or the trimmed text when it is not fenced.
pub fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match fence_regex().captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) if !inner.as_str().is_empty() => inner.as_str().trim(),
        _ => trimmed,
    }
}

pub fn parse_value(text: &str) -> Result<Value, GenerationError> {
    let candidate = strip_fence(text);
    serde_json::from_str::<Value>(candidate).map_err(|e| {
        tracing::error!(error = %e, original = %text, "failed to parse JSON response");
        GenerationError::MalformedJson { reason: e.to_string(), raw: text.to_string() }
    })
}

/// Parse model output into `T`. Malformed JSON and JSON of the wrong shape
/// are reported as distinct errors.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, GenerationError> {
    let value = parse_value(text)?;
    serde_json::from_value::<T>(value).map_err(|e| {
        tracing::error!(error = %e, original = %text, "JSON response does not match expected shape");
        GenerationError::SchemaMismatch(e.to_string())
    })
}
