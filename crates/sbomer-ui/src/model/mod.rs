//! Records returned by the SBOMer REST API.
//!
//! Each record is deserialized once from a payload and treated as immutable
//! afterwards. Status and result codes are kept as strings so values the
//! dashboard does not know about still render verbatim.

mod enhancement;
mod event;
mod generation;
mod manifest;
mod metadata;
mod stats;

pub use enhancement::Enhancement;
pub use event::Event;
pub use generation::Generation;
pub use manifest::Manifest;
pub use metadata::Metadata;
pub use stats::{
    ConsumerStats, GenerationCounts, ManifestCounts, MessagingStats, ProducerStats, ResourceStats,
    SbomerStats,
};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parses a timestamp leniently: RFC 3339 strings or epoch milliseconds.
///
/// Missing or unparseable values become `None` rather than failing the
/// whole record.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| parse_timestamp_value(&value)))
}

fn parse_timestamp_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(e) => {
                log::debug!("Ignoring unparseable timestamp '{}': {}", s, e);
                None
            }
        },
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

/// Accepts identifiers sent either as strings or as numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number identifier, got {}",
            other
        ))),
    }
}
