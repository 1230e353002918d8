use serde_json::Value;

use super::message::{project_all, with_page};
use super::projection::{FieldMapping, text};
use super::{MalformedPayload, RequestSpec};
use crate::domain::{InboxEntry, Operation, PageRequest, Paginated};
use crate::transport::envelope::Envelope;

const INBOX_PATH: &str = "inbox";

const INBOX_FIELDS: &[FieldMapping<InboxEntry>] = &[
    FieldMapping {
        sources: &["number", "to"],
        apply: |out, value| out.number = text(value),
    },
    FieldMapping {
        sources: &["sender", "from"],
        apply: |out, value| out.sender = text(value),
    },
    FieldMapping {
        sources: &["message"],
        apply: |out, value| out.message = text(value),
    },
    FieldMapping {
        sources: &["created_at", "time"],
        apply: |out, value| out.created_at = text(value),
    },
    FieldMapping {
        sources: &["type"],
        apply: |out, value| out.message_type = text(value),
    },
];

pub fn encode_fetch_inbox(page: PageRequest) -> RequestSpec {
    with_page(RequestSpec::get(INBOX_PATH), page)
}

/// Payload is either the list of messages itself or an object with a `messages` list.
pub fn extract_inbox(envelope: Envelope) -> Result<Paginated<InboxEntry>, MalformedPayload> {
    let operation = Operation::FetchInbox;
    let list = match envelope.payload {
        Some(Value::Array(list)) => list,
        Some(Value::Object(mut data)) => match data.remove("messages") {
            Some(Value::Array(list)) => list,
            _ => return Err(operation.into()),
        },
        _ => return Err(operation.into()),
    };

    Ok(Paginated {
        items: project_all(list, INBOX_FIELDS, operation)?,
        pagination: envelope.pagination.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Method, decode_envelope};

    #[test]
    fn encode_fetch_inbox_query() {
        let spec = encode_fetch_inbox(PageRequest::new(0, 2).unwrap());
        assert_eq!(spec.method, Method::Get);
        assert_eq!(spec.path, "inbox");
        assert_eq!(
            spec.query,
            vec![
                ("page".to_owned(), "0".to_owned()),
                ("per_page".to_owned(), "2".to_owned()),
            ]
        );
    }

    #[test]
    fn extract_inbox_from_messages_object() {
        let json = r#"
        {
          "status": "OK",
          "code": 200,
          "data": {
            "messages": [
              {
                "number": "+9810001",
                "message": "Hello",
                "sender": "+98912xxxxxxx",
                "time": "2019-12-17T23:02:10Z",
                "type": "normal"
              },
              {
                "number": "+9810001",
                "message": "Test",
                "sender": "+98913xxxxxxx",
                "time": "2019-12-17T23:01:59Z",
                "type": "normal"
              }
            ]
          },
          "meta": { "total": 2, "pages": 1, "limit": 2, "page": 0, "prev": null, "next": null }
        }
        "#;

        let page = extract_inbox(decode_envelope(json).unwrap()).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(
            page.items[0],
            InboxEntry {
                number: Some("+9810001".to_owned()),
                sender: Some("+98912xxxxxxx".to_owned()),
                message: Some("Hello".to_owned()),
                created_at: Some("2019-12-17T23:02:10Z".to_owned()),
                message_type: Some("normal".to_owned()),
            }
        );
        assert_eq!(page.items[1].message.as_deref(), Some("Test"));
        assert_eq!(page.pagination.total, Some(2));
    }

    #[test]
    fn extract_inbox_from_list_with_older_names() {
        let json = r#"
        {
          "data": [
            { "to": "+9810001", "from": "+98912xxxxxxx", "message": "Hi", "created_at": "2020-01-01" }
          ]
        }
        "#;

        let page = extract_inbox(decode_envelope(json).unwrap()).unwrap();
        let entry = &page.items[0];
        assert_eq!(entry.number.as_deref(), Some("+9810001"));
        assert_eq!(entry.sender.as_deref(), Some("+98912xxxxxxx"));
        assert_eq!(entry.created_at.as_deref(), Some("2020-01-01"));
        assert_eq!(entry.message_type, None);
        assert_eq!(page.pagination.total, None);
    }

    #[test]
    fn extract_inbox_rejects_missing_list() {
        for json in [
            r#"{ "data": { "inbox": [] } }"#,
            r#"{ "data": [ "Hello" ] }"#,
            r#"{ "meta": { "total": 0 } }"#,
        ] {
            let err = extract_inbox(decode_envelope(json).unwrap()).unwrap_err();
            assert_eq!(err.operation, Operation::FetchInbox, "body: {json}");
        }
    }
}
