//! SBOMer API error types.

use serde_json::{json, Value};
use thiserror::Error;

use crate::query_error::{extract_query_error_message_details, QueryErrorDetails};

/// Message fragment the backend uses when rejecting a search query.
const INVALID_QUERY_MESSAGE: &str = "The provided query is not valid";

/// Error code the backend uses when rejecting a search query.
const INVALID_QUERY_CODE: &str = "INVALID_QUERY";

/// Errors that can occur while talking to the SBOMer REST API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// The configured base URL or a derived request URL is invalid.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Network or transport level failure (DNS, connect, timeout).
    #[error("Failed fetching {resource} from SBOMer: {reason}")]
    Transport { resource: String, reason: String },

    /// The backend answered with a non-success status code.
    #[error("Failed fetching {resource} from SBOMer, got: {status} response: '{body}'")]
    Status {
        resource: String,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded.
    #[error("Failed to parse {resource} response from SBOMer: {reason}")]
    Decode { resource: String, reason: String },
}

impl ApiError {
    /// HTTP status code, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Backend error code from a JSON error body (`code` or `errorId`).
    pub fn code(&self) -> Option<String> {
        let ApiError::Status { body, .. } = self else {
            return None;
        };
        let value: Value = serde_json::from_str(body).ok()?;
        ["code", "errorId"]
            .into_iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::to_string)
    }

    /// Whether the backend rejected the search query itself.
    ///
    /// Matches the backend's invalid-query message, an HTTP 400, or the
    /// `INVALID_QUERY` error code.
    pub fn is_query_validation_error(&self) -> bool {
        self.to_string().contains(INVALID_QUERY_MESSAGE)
            || self.status() == Some(400)
            || self.code().as_deref() == Some(INVALID_QUERY_CODE)
    }

    /// Error shape handed to the query-error extractor.
    pub fn to_json(&self) -> Value {
        let mut value = json!({ "message": self.to_string() });
        if let Some(status) = self.status() {
            value["status"] = json!(status);
        }
        if let Some(code) = self.code() {
            value["code"] = json!(code);
        }
        value
    }

    /// Message and details for the invalid-query tile.
    pub fn query_error_details(&self) -> QueryErrorDetails {
        extract_query_error_message_details(Some(&self.to_json()))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
