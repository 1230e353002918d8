use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::domain::{ErrorDetail, PageCursor, PaginationInfo, ResponseCode};

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Uniform decoding of an IPPanel response body.
///
/// Every member is optional. `payload` distinguishes a missing `data` key
/// (`None`) from an explicit `"data": null` (`Some(Value::Null)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    pub status: Option<String>,
    pub code: Option<ResponseCode>,
    pub message: Option<String>,
    pub payload: Option<Value>,
    pub error_detail: Option<ErrorDetail>,
    pub pagination: Option<PaginationInfo>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeJson {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    data: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    error_message: Option<Value>,
    #[serde(default)]
    meta: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Decode a raw body into an [`Envelope`].
///
/// Fails only when the body is not JSON. A blank body (e.g. `204 No Content`)
/// and a JSON value that is not an object both decode to an empty envelope.
pub fn decode_envelope(body: &str) -> Result<Envelope, EnvelopeError> {
    if body.trim().is_empty() {
        return Ok(Envelope::default());
    }

    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Ok(Envelope::default());
    }
    let parsed: EnvelopeJson = serde_json::from_value(value)?;

    let error_detail = parsed
        .error
        .and_then(error_detail)
        .or_else(|| parsed.error_message.and_then(error_detail));

    Ok(Envelope {
        status: parsed.status.and_then(label),
        code: parsed.code.and_then(response_code),
        message: parsed.message.and_then(label),
        payload: parsed.data,
        error_detail,
        pagination: match parsed.meta {
            Some(Value::Object(meta)) => Some(pagination(&meta)),
            _ => None,
        },
    })
}

fn label(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn response_code(value: Value) -> Option<ResponseCode> {
    match value {
        Value::Number(number) => Some(match number.as_i64() {
            Some(code) => ResponseCode::Numeric(code),
            None => ResponseCode::Text(number.to_string()),
        }),
        Value::String(text) if !text.trim().is_empty() => Some(ResponseCode::Text(text)),
        _ => None,
    }
}

fn error_detail(value: Value) -> Option<ErrorDetail> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(ErrorDetail::Message(text)),
        Value::Object(map) if map.is_empty() => None,
        Value::Object(map) => Some(ErrorDetail::Fields(field_messages(map))),
        Value::Array(items) if items.is_empty() => None,
        other => Some(ErrorDetail::Message(other.to_string())),
    }
}

fn field_messages(map: Map<String, Value>) -> BTreeMap<String, Vec<String>> {
    map.into_iter()
        .map(|(field, value)| {
            let messages = match value {
                Value::Array(items) => items.into_iter().map(message_text).collect(),
                Value::Null => Vec::new(),
                other => vec![message_text(other)],
            };
            (field, messages)
        })
        .collect()
}

fn message_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn pagination(meta: &Map<String, Value>) -> PaginationInfo {
    PaginationInfo {
        total: meta.get("total").and_then(counter),
        limit: meta.get("limit").and_then(counter),
        page: meta.get("page").and_then(counter),
        pages: meta.get("pages").and_then(counter),
        prev: meta.get("prev").and_then(cursor),
        next: meta.get("next").and_then(cursor),
    }
}

fn counter(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn cursor(value: &Value) -> Option<PageCursor> {
    match value {
        Value::Number(number) => number.as_u64().map(PageCursor::Page),
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(PageCursor::Token(text.clone())),
        _ => None,
    }
}
