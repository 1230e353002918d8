use serde_json::{Map, Value, json};

use super::projection::{FieldMapping, amount, count, project, text};
use super::{MalformedPayload, RequestSpec};
use crate::domain::{
    DeliveryStatus, FetchStatuses, MessageId, MessageRecord, Operation, PageRequest, Paginated,
    SendMessage,
};
use crate::transport::envelope::Envelope;

const SEND_PATH: &str = "sms/send/webservice/single";
const MESSAGE_PATH: &str = "sms/message/all";
const RECIPIENTS_PATH: &str = "sms/message/show-recipient/message-id";

const MESSAGE_FIELDS: &[FieldMapping<MessageRecord>] = &[
    FieldMapping {
        sources: &["message_id", "bulk_id"],
        apply: |out, value| out.message_id = message_id(value),
    },
    FieldMapping {
        sources: &["number"],
        apply: |out, value| out.number = text(value),
    },
    FieldMapping {
        sources: &["message"],
        apply: |out, value| out.message = text(value),
    },
    FieldMapping {
        sources: &["state", "status"],
        apply: |out, value| out.state = text(value),
    },
    FieldMapping {
        sources: &["type"],
        apply: |out, value| out.message_type = text(value),
    },
    FieldMapping {
        sources: &["valid"],
        apply: |out, value| out.valid = text(value),
    },
    FieldMapping {
        sources: &["time", "created_at"],
        apply: |out, value| out.created_at = text(value),
    },
    FieldMapping {
        sources: &["time_send", "sent_at"],
        apply: |out, value| out.sent_at = text(value),
    },
    FieldMapping {
        sources: &["recipient_count", "recipients_count"],
        apply: |out, value| out.recipient_count = count(value),
    },
    FieldMapping {
        sources: &["exit_count", "valid_recipients_count"],
        apply: |out, value| out.valid_recipient_count = count(value),
    },
    FieldMapping {
        sources: &["part"],
        apply: |out, value| out.part = count(value),
    },
    FieldMapping {
        sources: &["cost"],
        apply: |out, value| out.cost = amount(value),
    },
    FieldMapping {
        sources: &["return_cost", "payback_cost"],
        apply: |out, value| out.return_cost = amount(value),
    },
    FieldMapping {
        sources: &["summary", "description"],
        apply: |out, value| out.summary = text(value),
    },
];

const DELIVERY_FIELDS: &[FieldMapping<DeliveryStatus>] = &[
    FieldMapping {
        sources: &["recipient"],
        apply: |out, value| out.recipient = text(value),
    },
    FieldMapping {
        sources: &["status"],
        apply: |out, value| out.status = text(value),
    },
];

pub fn encode_send(request: &SendMessage) -> RequestSpec {
    let recipients = request
        .recipients()
        .iter()
        .map(|it| Value::String(it.raw().to_owned()))
        .collect::<Vec<_>>();

    let mut description = Map::new();
    if let Some(summary) = request.summary() {
        description.insert("summary".to_owned(), Value::String(summary.to_owned()));
    }
    description.insert(
        "count_recipient".to_owned(),
        Value::String(recipients.len().to_string()),
    );

    RequestSpec::post(
        SEND_PATH,
        json!({
            "sender": request.sender().as_str(),
            "recipient": recipients,
            "message": request.message().as_str(),
            "description": description,
        }),
    )
}

pub fn encode_get_message(message_id: &MessageId) -> RequestSpec {
    RequestSpec::get(MESSAGE_PATH).with_query(MessageId::FIELD, message_id.as_str())
}

pub fn encode_fetch_statuses(request: &FetchStatuses) -> RequestSpec {
    let spec = RequestSpec::get(RECIPIENTS_PATH).with_segment(request.message_id().as_str());
    with_page(spec, request.page())
}

pub(super) fn with_page(spec: RequestSpec, page: PageRequest) -> RequestSpec {
    spec.with_query(PageRequest::PAGE_FIELD, page.page())
        .with_query(PageRequest::LIMIT_FIELD, page.limit())
}

/// Payload must be an object with `bulk_id` (or the older `message_id`).
pub fn extract_sent_id(envelope: Envelope) -> Result<MessageId, MalformedPayload> {
    sent_id(envelope, Operation::Send)
}

pub(super) fn sent_id(
    envelope: Envelope,
    operation: Operation,
) -> Result<MessageId, MalformedPayload> {
    let Some(Value::Object(data)) = envelope.payload else {
        return Err(operation.into());
    };
    ["bulk_id", "message_id"]
        .iter()
        .filter_map(|key| data.get(*key))
        .find_map(message_id)
        .ok_or(operation.into())
}

fn message_id(value: &Value) -> Option<MessageId> {
    match value {
        Value::Number(number) => number.as_u64().map(MessageId::from),
        Value::String(text) => MessageId::new(text.as_str()).ok(),
        _ => None,
    }
}

/// Payload is either a list whose first element is the message, or an object
/// holding it under `message`.
pub fn extract_message(envelope: Envelope) -> Result<MessageRecord, MalformedPayload> {
    let record = match envelope.payload {
        Some(Value::Array(items)) => match items.into_iter().next() {
            Some(Value::Object(record)) => record,
            _ => return Err(Operation::GetMessage.into()),
        },
        Some(Value::Object(mut data)) => match data.remove("message") {
            Some(Value::Object(record)) => record,
            _ => return Err(Operation::GetMessage.into()),
        },
        _ => return Err(Operation::GetMessage.into()),
    };
    Ok(project(&record, MESSAGE_FIELDS))
}

/// Payload must be an object with a `deliveries` (or older `recipients`) list.
pub fn extract_statuses(
    envelope: Envelope,
) -> Result<Paginated<DeliveryStatus>, MalformedPayload> {
    let operation = Operation::FetchStatuses;
    let Some(Value::Object(mut data)) = envelope.payload else {
        return Err(operation.into());
    };
    let list = match data.remove("deliveries") {
        Some(Value::Array(list)) => list,
        _ => match data.remove("recipients") {
            Some(Value::Array(list)) => list,
            _ => return Err(operation.into()),
        },
    };

    Ok(Paginated {
        items: project_all(list, DELIVERY_FIELDS, operation)?,
        pagination: envelope.pagination.unwrap_or_default(),
    })
}

pub(super) fn project_all<T: Default>(
    list: Vec<Value>,
    table: &[FieldMapping<T>],
    operation: Operation,
) -> Result<Vec<T>, MalformedPayload> {
    list.into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(project(&record, table)),
            _ => Err(operation.into()),
        })
        .collect()
}
