use std::collections::BTreeMap;

use crate::domain::value::{MessageId, PatternCode};

/// Account credit as reported by `sms/accounting/credit/show`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditBalance(f64);

impl CreditBalance {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Canonical message summary.
///
/// Field names differ between API generations (`time`/`created_at`,
/// `exit_count`/`valid_recipients_count`, ...); both spellings land here.
/// Fields the response did not carry stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageRecord {
    pub message_id: Option<MessageId>,
    pub number: Option<String>,
    pub message: Option<String>,
    pub state: Option<String>,
    pub message_type: Option<String>,
    pub valid: Option<String>,
    pub created_at: Option<String>,
    pub sent_at: Option<String>,
    pub recipient_count: Option<u64>,
    pub valid_recipient_count: Option<u64>,
    pub part: Option<u64>,
    pub cost: Option<f64>,
    pub return_cost: Option<f64>,
    pub summary: Option<String>,
}

/// Delivery state for one recipient of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryStatus {
    pub recipient: Option<String>,
    pub status: Option<String>,
}

/// Message received on one of the account lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboxEntry {
    /// Line number the message was received on.
    pub number: Option<String>,
    pub sender: Option<String>,
    pub message: Option<String>,
    pub created_at: Option<String>,
    pub message_type: Option<String>,
}

/// Pattern as returned by `sms/pattern/normal/store`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternHandle {
    pub code: PatternCode,
    pub status: Option<String>,
    pub template: Option<String>,
    pub is_shared: Option<bool>,
}

/// Reference to a neighbouring page, as a page number or an opaque token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    Page(u64),
    Token(String),
}

/// Pagination metadata from the envelope `meta` object.
///
/// Counters are never negative; a counter the server omitted (or sent in an
/// unusable form) is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationInfo {
    pub total: Option<u64>,
    pub limit: Option<u64>,
    pub page: Option<u64>,
    pub pages: Option<u64>,
    pub prev: Option<PageCursor>,
    pub next: Option<PageCursor>,
}

/// One page of records plus its pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

/// Detail attached to an API error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDetail {
    /// Human-readable error message.
    Message(String),
    /// Validation failures keyed by request field name.
    Fields(BTreeMap<String, Vec<String>>),
}

impl ErrorDetail {
    /// Iterate `(field, messages)` pairs. A plain message yields nothing.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        let map = match self {
            Self::Fields(map) => Some(map),
            Self::Message(_) => None,
        };
        map.into_iter()
            .flat_map(|map| map.iter().map(|(k, v)| (k.as_str(), v.as_slice())))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(message) => Some(message),
            Self::Fields(_) => None,
        }
    }
}

impl std::fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message(message) => f.write_str(message),
            Self::Fields(map) => {
                let mut first = true;
                for (field, messages) in map {
                    if !first {
                        f.write_str("; ")?;
                    }
                    first = false;
                    write!(f, "{field}: {}", messages.join(", "))?;
                }
                Ok(())
            }
        }
    }
}
