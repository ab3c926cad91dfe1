//! Validate raw model output into typed results

use crate::error::AssistError;
use marginalia_domain::{AnalysisResult, SearchCandidate};
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// Accept free-text output
///
/// The text is passed through unchanged; blank output is an empty response.
pub fn validate_text(response: String) -> Result<String, AssistError> {
    if response.trim().is_empty() {
        return Err(AssistError::EmptyResponse);
    }
    Ok(response)
}

/// Parse the Analyze response
///
/// Only an unparseable payload (or one that is not a JSON object) fails. Each
/// of the five categories is defaulted independently: absent or non-array
/// fields become empty, non-string entries are dropped.
pub fn parse_analysis(response: &str) -> Result<AnalysisResult, AssistError> {
    let json = parse_object(response)?;
    let obj = json
        .as_object()
        .ok_or_else(|| AssistError::MalformedResponse("Expected JSON object".to_string()))?;

    let mut result = AnalysisResult::default();
    for field in AnalysisResult::FIELDS {
        let Some(target) = result.field_mut(field) else {
            continue;
        };
        match obj.get(field) {
            Some(Value::Array(items)) => {
                *target = string_items(field, items);
            }
            Some(other) => {
                warn!("Analysis field '{}' is not an array ({}), defaulting to empty", field, type_name(other));
            }
            None => {
                warn!("Analysis field '{}' missing, defaulting to empty", field);
            }
        }
    }

    Ok(result)
}

/// Parse the SemanticSearch response into ids, in response order
///
/// Requires a top-level object whose `results` field is an array of strings.
/// Anything else is malformed; an empty array is a valid "nothing relevant".
pub fn parse_search_results(response: &str) -> Result<Vec<String>, AssistError> {
    let json = parse_object(response)?;

    let results = json
        .get("results")
        .ok_or_else(|| AssistError::MalformedResponse("Missing 'results' field".to_string()))?
        .as_array()
        .ok_or_else(|| AssistError::MalformedResponse("'results' is not an array".to_string()))?;

    results
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                AssistError::MalformedResponse(format!("Result id is not a string: {}", item))
            })
        })
        .collect()
}

/// Keep only ids drawn from the candidate set, first occurrence wins
pub fn retain_candidate_ids(ids: Vec<String>, candidates: &[SearchCandidate]) -> Vec<String> {
    let known: HashSet<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
    let mut seen = HashSet::new();

    ids.into_iter()
        .filter(|id| {
            if !known.contains(id.as_str()) {
                warn!("Dropping search result '{}' not in the candidate set", id);
                return false;
            }
            seen.insert(id.clone())
        })
        .collect()
}

fn parse_object(response: &str) -> Result<Value, AssistError> {
    let json_str = extract_json(response)?;
    Ok(serde_json::from_str(json_str)?)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<&str, AssistError> {
    let trimmed = response.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        // Language tag, if any, runs up to the first non-alphanumeric char
        let body = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
        let body = body.strip_suffix("```").unwrap_or(body).trim();
        if body.is_empty() {
            return Err(AssistError::MalformedResponse("Empty code block".to_string()));
        }
        return Ok(body);
    }

    Ok(trimmed)
}

fn string_items(field: &str, items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                warn!("Dropping non-string entry in '{}': {}", field, item);
                None
            }
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
