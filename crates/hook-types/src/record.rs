//! Captured request shapes: Record, NewRecord, Body, HeaderValue.

use bytes::Bytes;
use serde::Serialize;
use std::collections::BTreeMap;

/// Timestamp format used for records and the capture log line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Value of one header name: a single value, or every value when the header repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Single(String),
    Multiple(Vec<String>),
}

impl HeaderValue {
    /// Add another value for the same header name.
    pub fn push(&mut self, value: String) {
        match self {
            HeaderValue::Single(first) => {
                let first = std::mem::take(first);
                *self = HeaderValue::Multiple(vec![first, value]);
            }
            HeaderValue::Multiple(values) => values.push(value),
        }
    }
}

/// Request payload after normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Payload declared as JSON and parsed successfully.
    Json(serde_json::Value),
    /// URL-encoded form payload.
    Form(BTreeMap<String, String>),
    /// Any other payload, or JSON that failed to parse.
    Raw(Bytes),
    /// Empty payload.
    Absent,
}

impl Body {
    /// JSON view of the body for display. Raw bytes become a (lossy UTF-8) string and an
    /// absent body shows as an empty object.
    pub fn to_display_value(&self) -> serde_json::Value {
        match self {
            Body::Json(v) => v.clone(),
            Body::Form(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect(),
            ),
            Body::Raw(bytes) => {
                serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
            }
            Body::Absent => serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// A normalized request that has not been stored yet (no sequence id).
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub timestamp: String,
    pub method: String,
    pub path: String,
    pub headers: BTreeMap<String, HeaderValue>,
    pub query: BTreeMap<String, String>,
    pub body: Body,
}

/// One stored capture. Created by the store from a [`NewRecord`]; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Record {
    pub id: u64,
    pub timestamp: String,
    pub method: String,
    pub path: String,
    pub headers: BTreeMap<String, HeaderValue>,
    pub query: BTreeMap<String, String>,
    pub body: Body,
}

impl Record {
    pub fn from_new(id: u64, new: NewRecord) -> Self {
        Self {
            id,
            timestamp: new.timestamp,
            method: new.method,
            path: new.path,
            headers: new.headers,
            query: new.query,
            body: new.body,
        }
    }
}

/// Side-channel event emitted once per captured request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureEvent {
    pub id: u64,
    pub timestamp: String,
    pub method: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_value_push_promotes_to_list() {
        let mut v = HeaderValue::Single("a".to_string());
        v.push("b".to_string());
        v.push("c".to_string());
        assert_eq!(
            v,
            HeaderValue::Multiple(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(serde_json::to_value(&v).unwrap(), json!(["a", "b", "c"]));
    }

    #[test]
    fn display_value_per_variant() {
        let mut form = BTreeMap::new();
        form.insert("foo".to_string(), "bar".to_string());
        assert_eq!(Body::Form(form).to_display_value(), json!({"foo": "bar"}));
        assert_eq!(
            Body::Raw(Bytes::from_static(b"plain text")).to_display_value(),
            json!("plain text")
        );
        assert_eq!(Body::Absent.to_display_value(), json!({}));
        assert_eq!(Body::Json(json!([1, 2])).to_display_value(), json!([1, 2]));
    }
}
