use lazy_static::lazy_static;
use regex::Regex;

use super::prompt::REQUIRED_FIELDS;
use crate::errors::{GradingError, GradingResult};
use crate::grading::ParsedGrade;

lazy_static! {
    static ref FENCED_BLOCK: Regex =
        Regex::new(r"```(?i:json)?\s*([\s\S]*?)\s*```").expect("fenced block regex is valid");
}

/// Fenced content if the text has a ``` block, otherwise the trimmed text.
pub(crate) fn extract_payload(raw: &str) -> &str {
    match FENCED_BLOCK.captures(raw).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => raw.trim(),
    }
}

pub(crate) fn parse_grade_response_impl(raw: &str) -> GradingResult<ParsedGrade> {
    let payload = extract_payload(raw);

    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| GradingError::MalformedResponse {
            message: format!("failed to parse grading response as JSON: {}", e),
        })?;

    let obj = value
        .as_object()
        .ok_or_else(|| GradingError::MalformedResponse {
            message: format!("expected a JSON object, got {}", json_kind(&value)),
        })?;

    for field in REQUIRED_FIELDS {
        if !obj.contains_key(field) {
            return Err(GradingError::IncompleteResponse { field });
        }
    }

    serde_json::from_value(value).map_err(|e| GradingError::MalformedResponse {
        message: format!("grading response has unexpected shape: {}", e),
    })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
