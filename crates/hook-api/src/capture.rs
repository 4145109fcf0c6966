//! Normalization of an inbound request into a [`NewRecord`].

use axum::http::{header, HeaderMap, Method, Uri};
use bytes::Bytes;
use hook_types::{Body, HeaderValue, NewRecord, TIMESTAMP_FORMAT};
use std::collections::BTreeMap;

/// Largest accepted request body (10 MB); larger bodies are rejected with 413.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Current local time in the record timestamp format.
pub fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub fn normalize(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    payload: Bytes,
    timestamp: String,
) -> NewRecord {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    NewRecord {
        timestamp,
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        headers: collect_headers(headers),
        query: parse_query(uri.query()),
        body: parse_body(content_type, payload),
    }
}

/// Header names are already lowercase in `HeaderMap`; repeated names collect into a list.
pub fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, HeaderValue> {
    let mut out: BTreeMap<String, HeaderValue> = BTreeMap::new();
    for (name, value) in headers.iter() {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        match out.get_mut(name.as_str()) {
            Some(existing) => existing.push(value),
            None => {
                out.insert(name.as_str().to_string(), HeaderValue::Single(value));
            }
        }
    }
    out
}

/// Repeated keys keep the last value.
pub fn parse_query(query: Option<&str>) -> BTreeMap<String, String> {
    match query {
        Some(q) => url::form_urlencoded::parse(q.as_bytes())
            .into_owned()
            .collect(),
        None => BTreeMap::new(),
    }
}

enum PayloadKind {
    Json,
    Form,
    Other,
}

fn payload_kind(content_type: Option<&str>) -> PayloadKind {
    let Some(parsed) = content_type.and_then(|ct| ct.parse::<mime::Mime>().ok()) else {
        return PayloadKind::Other;
    };
    if parsed.type_() == mime::APPLICATION
        && (parsed.subtype() == mime::JSON || parsed.suffix() == Some(mime::JSON))
    {
        PayloadKind::Json
    } else if parsed.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str() {
        PayloadKind::Form
    } else {
        PayloadKind::Other
    }
}

/// Decode the payload by content type. A JSON payload that does not parse is kept raw.
pub fn parse_body(content_type: Option<&str>, payload: Bytes) -> Body {
    if payload.is_empty() {
        return Body::Absent;
    }
    match payload_kind(content_type) {
        PayloadKind::Json => match serde_json::from_slice(&payload) {
            Ok(value) => Body::Json(value),
            Err(e) => {
                tracing::debug!(error = %e, "malformed JSON body, storing raw payload");
                Body::Raw(payload)
            }
        },
        PayloadKind::Form => Body::Form(
            url::form_urlencoded::parse(&payload)
                .into_owned()
                .collect(),
        ),
        PayloadKind::Other => Body::Raw(payload),
    }
}
