//! Recover a schema from loosely formatted model output.
//!
//! The text is first narrowed to the inside of a fenced code block if one is
//! present. The candidate then goes through an ordered list of parse
//! strategies; the first one that yields a JSON object wins.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::ir::Schema;

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").unwrap());

type Strategy = fn(&str) -> Option<Map<String, Value>>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("strict", parse_strict as Strategy),
    ("brace_span", parse_brace_span as Strategy),
];

/// Parse model output into a validated schema.
pub fn extract(raw: &str) -> Result<Schema, SchemaError> {
    let payload = recover_payload(raw)?;
    let body = unwrap_envelope(payload)?;
    Ok(Schema::from_value(body)?)
}

/// Locate and parse the JSON object embedded in `raw`.
pub fn recover_payload(raw: &str) -> Result<Map<String, Value>, SchemaError> {
    let candidate = fenced_block(raw).unwrap_or(raw).trim();

    for (name, strategy) in STRATEGIES {
        if let Some(object) = strategy(candidate) {
            tracing::debug!(strategy = name, "recovered JSON payload");
            return Ok(object);
        }
    }

    let reason = if candidate.contains('{') {
        "no parseable JSON object"
    } else {
        "no JSON object delimiters"
    };
    Err(SchemaError::MalformedPayload(reason.to_string()))
}

/// Inner text of the first triple-backtick block, if any.
pub fn fenced_block(raw: &str) -> Option<&str> {
    FENCED_BLOCK
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn parse_strict(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(candidate) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

fn parse_brace_span(candidate: &str) -> Option<Map<String, Value>> {
    let start = candidate.find('{')?;
    let end = candidate.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_strict(&candidate[start..=end])
}

/// Pull the schema body out of a `{status, schema}` envelope.
///
/// Objects without a `schema` key are the body themselves.
fn unwrap_envelope(mut payload: Map<String, Value>) -> Result<Value, SchemaError> {
    match payload.remove("schema") {
        Some(Value::Null) | None if is_error_envelope(&payload) => {
            let message = payload
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("model reported an error")
                .to_string();
            Err(SchemaError::UpstreamUnavailable(message))
        }
        Some(body) => Ok(body),
        None => Ok(Value::Object(payload)),
    }
}

fn is_error_envelope(payload: &Map<String, Value>) -> bool {
    payload.get("status").and_then(Value::as_str) == Some("error")
}
