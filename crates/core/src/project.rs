//! Input rules for project records.
//!
//! Request payloads carry `hashtags` as a comma-separated string and
//! `comments` as a JSON-encoded string. An empty string is treated the same
//! as an absent field.

use chrono::Utc;
use serde_json::Value;

use crate::error::CoreError;
use crate::types::{RecordId, Timestamp};

/// Entity name used in not-found errors.
pub const PROJECT_ENTITY: &str = "Project";

/// Return the value only if it was supplied and is non-empty.
pub fn supplied(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Require a non-empty description.
pub fn require_description(description: Option<&str>) -> Result<&str, CoreError> {
    supplied(description).ok_or_else(|| CoreError::Validation("Description is required".into()))
}

/// Split a comma-separated hashtag string.
///
/// Segments are kept verbatim (no trimming, empty segments preserved) so
/// `"a,b,c"` becomes `["a", "b", "c"]` and `"a,,b"` keeps its empty middle.
pub fn split_hashtags(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Parse a JSON-encoded comment list.
///
/// Malformed JSON or a non-array value is an [`CoreError::Internal`] error:
/// the request is rejected with a generic failure and the detail is logged.
pub fn parse_comments(raw: &str) -> Result<Vec<Value>, CoreError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(CoreError::Internal(format!(
            "comments must be a JSON array, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(CoreError::Internal(format!("malformed comments JSON: {e}"))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Generate a fresh record id.
///
/// UUID v7 keeps ids roughly creation-ordered while staying unique under
/// concurrent creation.
pub fn new_record_id() -> RecordId {
    uuid::Uuid::now_v7().to_string()
}

/// Timestamp for an update of a record last touched at `previous`.
///
/// Always strictly later than `previous`, even if the wall clock has not
/// advanced (or went backwards) since.
pub fn next_update_timestamp(previous: Timestamp) -> Timestamp {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}
