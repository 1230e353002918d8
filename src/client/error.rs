use std::error::Error as StdError;

use crate::domain::{ErrorDetail, KnownResponseCode, Operation, ResponseCode, ValidationError};
use crate::transport::MalformedPayload;

/// The call could not be completed or its response could not be read as an
/// IPPanel envelope.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP client failure (DNS, TLS, connection reset, timeout, ...).
    #[error("request failed: {0}")]
    Request(#[source] Box<dyn StdError + Send + Sync>),

    /// The body is not JSON although the status is one IPPanel answers with JSON.
    #[error("invalid JSON body with HTTP status {status}: {source}")]
    InvalidBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The status is not one IPPanel is known to use and the body explains nothing.
    #[error("unexpected HTTP status: {status}")]
    UnexpectedStatus { status: u16, body: Option<String> },
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`IppanelClient`](crate::IppanelClient).
///
/// The kinds are told apart by variant:
/// - [`IppanelError::Transport`]: the call did not complete; the only kind worth retrying,
/// - [`IppanelError::Api`]: IPPanel rejected the request,
/// - [`IppanelError::MalformedPayload`]: a success response lacked what the operation needs,
/// - [`IppanelError::Validation`] / [`IppanelError::InvalidBaseUrl`]: local input problems.
pub enum IppanelError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// IPPanel understood the request and refused it.
    #[error("API error {code}: {detail}")]
    Api {
        code: ResponseCode,
        detail: ErrorDetail,
    },

    #[error("malformed response payload for {operation}")]
    MalformedPayload { operation: Operation },

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl IppanelError {
    /// Whether retrying the same call later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The API error code mapped to a known variant, if any.
    pub fn known_code(&self) -> Option<KnownResponseCode> {
        match self {
            Self::Api { code, .. } => code.known(),
            _ => None,
        }
    }

    /// Whether IPPanel rejected the request with per-field validation messages.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Api { code, detail } => {
                matches!(detail, ErrorDetail::Fields(_))
                    || code.known().is_some_and(KnownResponseCode::is_validation)
            }
            _ => false,
        }
    }

    /// Iterate `(field, messages)` of an API validation error; empty otherwise.
    pub fn field_errors(&self) -> impl Iterator<Item = (&str, &[String])> {
        let detail = match self {
            Self::Api { detail, .. } => Some(detail),
            _ => None,
        };
        detail.into_iter().flat_map(|detail| detail.fields())
    }
}

impl From<MalformedPayload> for IppanelError {
    fn from(value: MalformedPayload) -> Self {
        Self::MalformedPayload {
            operation: value.operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn transport_errors_are_transient() {
        let err = IppanelError::from(TransportError::UnexpectedStatus {
            status: 502,
            body: None,
        });
        assert!(err.is_transient());
        assert!(!err.is_validation());
        assert_eq!(err.known_code(), None);
        assert_eq!(err.to_string(), "transport error: unexpected HTTP status: 502");
    }

    #[test]
    fn api_errors_expose_code_and_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("sender".to_owned(), vec!["is invalid".to_owned()]);
        let err = IppanelError::Api {
            code: ResponseCode::Numeric(422),
            detail: ErrorDetail::Fields(fields),
        };

        assert!(!err.is_transient());
        assert!(err.is_validation());
        assert_eq!(err.known_code(), Some(KnownResponseCode::UnprocessableEntity));
        let collected = err.field_errors().collect::<Vec<_>>();
        assert_eq!(collected, vec![("sender", &["is invalid".to_owned()][..])]);
        assert_eq!(err.to_string(), "API error 422: sender: is invalid");
    }

    #[test]
    fn plain_api_errors_have_no_fields() {
        let err = IppanelError::Api {
            code: ResponseCode::Text("10006".to_owned()),
            detail: ErrorDetail::Message("credit not enough".to_owned()),
        };
        assert!(!err.is_validation());
        assert_eq!(err.known_code(), Some(KnownResponseCode::CreditNotEnough));
        assert_eq!(err.field_errors().count(), 0);
    }

    #[test]
    fn malformed_payload_names_operation() {
        let err = IppanelError::from(MalformedPayload {
            operation: Operation::Send,
        });
        assert!(matches!(
            err,
            IppanelError::MalformedPayload {
                operation: Operation::Send
            }
        ));
        assert_eq!(err.to_string(), "malformed response payload for send");
        assert!(!err.is_transient());
    }
}
