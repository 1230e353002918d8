//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod account;
mod classify;
mod envelope;
mod inbox;
mod message;
mod pattern;
mod projection;

pub use account::{encode_get_credit, extract_credit};
pub use classify::{Rejection, classify, is_recognized_status};
pub use envelope::{Envelope, EnvelopeError, decode_envelope};
pub use inbox::{encode_fetch_inbox, extract_inbox};
pub use message::{
    encode_fetch_statuses, encode_get_message, encode_send, extract_message, extract_sent_id,
    extract_statuses,
};
pub use pattern::{
    encode_create_pattern, encode_send_pattern, extract_pattern, extract_pattern_send_id,
};

use serde_json::Value;

use crate::domain::Operation;

/// HTTP verb of an IPPanel call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether requests with this verb carry a JSON body rather than query params.
    pub fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

/// Operation request before credentials and base address are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    /// Path relative to the API base address.
    pub path: String,
    /// Caller-supplied segments appended after `path`, each percent-encoded as
    /// a single segment when the URL is built.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestSpec {
    fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            segments: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            segments: Vec::new(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }
}

/// A success response lacked the structure the operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("response payload for {operation} is malformed")]
pub struct MalformedPayload {
    pub operation: Operation,
}

impl From<Operation> for MalformedPayload {
    fn from(operation: Operation) -> Self {
        Self { operation }
    }
}
