use crate::domain::{ErrorDetail, ResponseCode};
use crate::transport::envelope::Envelope;

/// Statuses that carry a successful payload.
pub const SUCCESS_STATUSES: [u16; 3] = [200, 201, 204];

/// Statuses IPPanel answers with a JSON envelope, successful or not.
pub const RECOGNIZED_STATUSES: [u16; 10] = [200, 201, 204, 400, 401, 403, 404, 405, 422, 500];

/// Why a decoded response must not reach a payload extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The service understood the request and refused it.
    Api {
        code: ResponseCode,
        detail: ErrorDetail,
    },
    /// The status is outside [`RECOGNIZED_STATUSES`] and the body explains nothing.
    UnexpectedStatus { status: u16 },
}

pub fn is_recognized_status(status: u16) -> bool {
    RECOGNIZED_STATUSES.contains(&status)
}

/// Decide whether a response is an error.
///
/// Precedence, first match wins:
/// 1. a non-empty error detail is an API error whatever the status; its code is
///    the envelope `code` unless that is absent or a success marker, in which
///    case the HTTP status is used;
/// 2. a success status is not an error;
/// 3. another recognized status is an API error coded with the HTTP status;
/// 4. anything else is an unexpected status.
pub fn classify(status: u16, envelope: &Envelope) -> Option<Rejection> {
    if let Some(detail) = envelope.error_detail.as_ref() {
        let code = envelope
            .code
            .clone()
            .filter(|code| !code.is_success_marker())
            .unwrap_or_else(|| ResponseCode::from_status(status));
        return Some(Rejection::Api {
            code,
            detail: detail.clone(),
        });
    }

    if SUCCESS_STATUSES.contains(&status) {
        return None;
    }

    if is_recognized_status(status) {
        return Some(Rejection::Api {
            code: ResponseCode::from_status(status),
            detail: ErrorDetail::Message(status_text(status, envelope)),
        });
    }

    Some(Rejection::UnexpectedStatus { status })
}

fn status_text(status: u16, envelope: &Envelope) -> String {
    if let Some(message) = envelope.message.as_deref().map(str::trim) {
        if !message.is_empty() {
            return message.to_owned();
        }
    }
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|it| it.canonical_reason())
        .map(str::to_owned)
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::transport::envelope::decode_envelope;

    #[test]
    fn success_status_without_error_passes() {
        let envelope = decode_envelope(r#"{ "status": "OK", "code": "OK", "data": {} }"#).unwrap();
        for status in SUCCESS_STATUSES {
            assert_eq!(classify(status, &envelope), None);
        }
    }

    #[test]
    fn error_detail_wins_over_success_status() {
        let envelope = decode_envelope(r#"{ "code": "10006", "error": "credit not enough" }"#)
            .unwrap();

        let rejection = classify(200, &envelope).unwrap();
        assert_eq!(
            rejection,
            Rejection::Api {
                code: ResponseCode::Text("10006".to_owned()),
                detail: ErrorDetail::Message("credit not enough".to_owned()),
            }
        );
    }

    #[test]
    fn error_detail_falls_back_to_http_status_code() {
        let no_code = decode_envelope(r#"{ "error_message": "key revoked" }"#).unwrap();
        assert_eq!(
            classify(401, &no_code),
            Some(Rejection::Api {
                code: ResponseCode::Numeric(401),
                detail: ErrorDetail::Message("key revoked".to_owned()),
            })
        );

        let ok_code = decode_envelope(r#"{ "code": "OK", "error": "boom" }"#).unwrap();
        assert!(matches!(
            classify(500, &ok_code),
            Some(Rejection::Api {
                code: ResponseCode::Numeric(500),
                ..
            })
        ));
    }

    #[test]
    fn validation_errors_keep_field_map() {
        let envelope = decode_envelope(
            r#"{ "code": 422, "error": { "recipient": ["is required", "too short"] } }"#,
        )
        .unwrap();

        let Some(Rejection::Api { code, detail }) = classify(422, &envelope) else {
            panic!("expected api rejection");
        };
        assert!(code.known().is_some_and(|it| it.is_validation()));

        let mut expected = BTreeMap::new();
        expected.insert(
            "recipient".to_owned(),
            vec!["is required".to_owned(), "too short".to_owned()],
        );
        assert_eq!(detail, ErrorDetail::Fields(expected));
    }

    #[test]
    fn error_detail_on_unrecognized_status_is_still_api_error() {
        let envelope = decode_envelope(r#"{ "code": 1402, "error": "key not valid" }"#).unwrap();
        assert!(matches!(
            classify(429, &envelope),
            Some(Rejection::Api {
                code: ResponseCode::Numeric(1402),
                ..
            })
        ));
    }

    #[test]
    fn recognized_status_without_detail_uses_message_or_reason() {
        let with_message = decode_envelope(r#"{ "message": "Not found" }"#).unwrap();
        assert_eq!(
            classify(404, &with_message),
            Some(Rejection::Api {
                code: ResponseCode::Numeric(404),
                detail: ErrorDetail::Message("Not found".to_owned()),
            })
        );

        assert_eq!(
            classify(405, &Envelope::default()),
            Some(Rejection::Api {
                code: ResponseCode::Numeric(405),
                detail: ErrorDetail::Message("Method Not Allowed".to_owned()),
            })
        );
    }

    #[test]
    fn unrecognized_status_without_detail_is_unexpected() {
        for status in [202, 301, 429, 502, 503] {
            assert_eq!(
                classify(status, &Envelope::default()),
                Some(Rejection::UnexpectedStatus { status })
            );
        }
    }

    #[test]
    fn classification_is_repeatable() {
        let envelope = decode_envelope(r#"{ "code": 422, "error": { "sender": ["bad"] } }"#)
            .unwrap();
        assert_eq!(classify(422, &envelope), classify(422, &envelope));

        let ok = decode_envelope(r#"{ "data": { "credit": 1 } }"#).unwrap();
        assert_eq!(classify(200, &ok), classify(200, &ok));
    }
}
