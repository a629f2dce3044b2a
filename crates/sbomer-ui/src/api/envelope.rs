//! List-response envelopes.
//!
//! Depending on the endpoint and backend version a list comes back as a bare
//! array, `{content: [...], totalHits}` or `{data: [...], total}`. Everything
//! is normalized into [`Page`] before it reaches a loader.

use serde::de::{DeserializeOwned, Error as _};
use serde::Serialize;
use serde_json::Value;

/// One page of records plus the total number of matching records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: u64) -> Self {
        Self { data, total }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
        }
    }
}

fn total_field(object: &serde_json::Map<String, Value>, key: &str) -> Option<u64> {
    object.get(key).and_then(Value::as_u64)
}

/// Normalizes any supported list envelope into a [`Page`].
///
/// The total is the first non-zero of `totalHits`, `total`, and the number of
/// items on the page.
pub fn normalize_page<T: DeserializeOwned>(value: Value) -> serde_json::Result<Page<T>> {
    let (items, hinted_total) = match value {
        Value::Array(items) => (items, None),
        Value::Object(mut object) => {
            let items = ["content", "data"]
                .into_iter()
                .find_map(|key| match object.remove(key) {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                })
                .unwrap_or_default();
            let total = [total_field(&object, "totalHits"), total_field(&object, "total")]
                .into_iter()
                .flatten()
                .find(|total| *total > 0);
            (items, total)
        }
        other => {
            return Err(serde_json::Error::custom(format!(
                "expected a list or a list envelope, got {}",
                json_kind(&other)
            )))
        }
    };

    let data: Vec<T> = serde_json::from_value(Value::Array(items))?;
    let total = hinted_total.unwrap_or(data.len() as u64);
    Ok(Page { data, total })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
