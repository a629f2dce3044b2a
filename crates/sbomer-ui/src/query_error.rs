//! Best-effort extraction of a message/details pair from backend errors.
//!
//! Errors reach the dashboard in several shapes: a plain message, a
//! structured `{message, details}` object, or a message string that embeds
//! the backend's JSON error body in quotes, e.g.
//! `Failed fetching events from SBOMer, got: 400 response: '{"message":...}'`.
//! Extraction never fails; anything unrecognized degrades to the raw text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

static RE_SINGLE_QUOTED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)'(\{.*\})'").unwrap());
static RE_DOUBLE_QUOTED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)"(\{.*\})""#).unwrap());

const UNKNOWN_ERROR: &str = "Unknown error";

/// Message and optional details shown in the invalid-query tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryErrorDetails {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl QueryErrorDetails {
    fn unknown() -> Self {
        Self {
            message: UNKNOWN_ERROR.to_string(),
            details: None,
        }
    }

    fn plain(message: &str) -> Self {
        Self {
            message: message.to_string(),
            details: None,
        }
    }
}

fn details_to_string(details: Option<&Value>) -> Option<String> {
    match details? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

fn from_structured(object: &serde_json::Map<String, Value>) -> Option<QueryErrorDetails> {
    let message = object.get("message").and_then(Value::as_str)?;
    Some(QueryErrorDetails {
        message: message.to_string(),
        details: details_to_string(object.get("details")),
    })
}

fn embedded_json(message: &str) -> Option<serde_json::Map<String, Value>> {
    [&*RE_SINGLE_QUOTED_JSON, &*RE_DOUBLE_QUOTED_JSON]
        .into_iter()
        .filter_map(|re| re.captures(message))
        .find_map(|captures| {
            let candidate = captures.get(1)?.as_str();
            match serde_json::from_str::<Value>(candidate) {
                Ok(Value::Object(object)) => Some(object),
                Ok(_) => None,
                Err(e) => {
                    log::debug!("Embedded error body is not valid JSON: {}", e);
                    None
                }
            }
        })
}

fn from_message_text(message: &str) -> QueryErrorDetails {
    embedded_json(message)
        .and_then(|object| from_structured(&object))
        .unwrap_or_else(|| QueryErrorDetails::plain(message))
}

/// Pulls `{message, details}` out of an error of unknown shape.
///
/// `error` is expected to be an object with a `message` field, but a bare
/// string is accepted too. Array details are joined with `", "`.
pub fn extract_query_error_message_details(error: Option<&Value>) -> QueryErrorDetails {
    let message = match error {
        None | Some(Value::Null) => return QueryErrorDetails::unknown(),
        Some(Value::String(text)) => return from_message_text(text),
        Some(Value::Object(object)) => object.get("message"),
        Some(_) => return QueryErrorDetails::unknown(),
    };

    match message {
        Some(Value::Object(inner)) => {
            from_structured(inner).unwrap_or_else(QueryErrorDetails::unknown)
        }
        Some(Value::String(text)) if !text.is_empty() => from_message_text(text),
        _ => QueryErrorDetails::unknown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_single_quoted_json_with_array_details() {
        let error = json!({
            "message": r#"Error response: '{"message":"Bad request","details":["Field is required","Invalid format"]}'"#
        });
        let result = extract_query_error_message_details(Some(&error));
        assert_eq!(result.message, "Bad request");
        assert_eq!(
            result.details.as_deref(),
            Some("Field is required, Invalid format")
        );
    }

    #[test]
    fn test_extracts_spec_example() {
        let error = json!({
            "message": r#"Failed fetching events from SBOMer, got: 400 response: '{"message":"Bad request","details":["A","B"]}'"#
        });
        let result = extract_query_error_message_details(Some(&error));
        assert_eq!(
            result,
            QueryErrorDetails {
                message: "Bad request".to_string(),
                details: Some("A, B".to_string()),
            }
        );
    }

    #[test]
    fn test_extracts_double_quoted_json() {
        let error = json!({
            "message": r#"Error response: "{"message":"Not found","details":"Resource does not exist"}""#
        });
        let result = extract_query_error_message_details(Some(&error));
        assert_eq!(result.message, "Not found");
        assert_eq!(result.details.as_deref(), Some("Resource does not exist"));
    }

    #[test]
    fn test_structured_message_object() {
        let error = json!({
            "message": {
                "message": "Server error",
                "details": ["Connection timeout", "Retry failed"]
            }
        });
        let result = extract_query_error_message_details(Some(&error));
        assert_eq!(result.message, "Server error");
        assert_eq!(
            result.details.as_deref(),
            Some("Connection timeout, Retry failed")
        );
    }

    #[test]
    fn test_structured_message_object_with_string_details() {
        let error = json!({
            "message": { "message": "Validation error", "details": "Invalid input" }
        });
        let result = extract_query_error_message_details(Some(&error));
        assert_eq!(result.message, "Validation error");
        assert_eq!(result.details.as_deref(), Some("Invalid input"));
    }

    #[test]
    fn test_plain_message_without_json() {
        let error = json!({ "message": "Simple error message" });
        let result = extract_query_error_message_details(Some(&error));
        assert_eq!(result.message, "Simple error message");
        assert!(result.details.is_none());
    }

    #[test]
    fn test_invalid_embedded_json_returns_original() {
        let original = r#"Error response: '{"message":"Bad request", invalid json}'"#;
        let error = json!({ "message": original });
        let result = extract_query_error_message_details(Some(&error));
        assert_eq!(result.message, original);
        assert!(result.details.is_none());
    }

    #[test]
    fn test_embedded_json_without_message_returns_original() {
        let original = r#"got: 500 response: '{"status":500}'"#;
        let result = extract_query_error_message_details(Some(&json!({ "message": original })));
        assert_eq!(result.message, original);
    }

    #[test]
    fn test_unknown_error_for_missing_input() {
        assert_eq!(
            extract_query_error_message_details(None).message,
            "Unknown error"
        );
        assert_eq!(
            extract_query_error_message_details(Some(&Value::Null)).message,
            "Unknown error"
        );
        assert_eq!(
            extract_query_error_message_details(Some(&json!({}))).message,
            "Unknown error"
        );
        assert_eq!(
            extract_query_error_message_details(Some(&json!(42))).message,
            "Unknown error"
        );
    }

    #[test]
    fn test_bare_string_error() {
        let result = extract_query_error_message_details(Some(&json!("Connection refused")));
        assert_eq!(result.message, "Connection refused");
        assert!(result.details.is_none());
    }
}
