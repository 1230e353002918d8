use serde_json::{Map, Value, json};

use super::message::sent_id;
use super::projection::{FieldMapping, flag, project, text};
use super::{MalformedPayload, RequestSpec};
use crate::domain::{CreatePattern, MessageId, Operation, PatternCode, PatternHandle, SendPattern};
use crate::transport::envelope::Envelope;

const CREATE_PATH: &str = "sms/pattern/normal/store";
const SEND_PATH: &str = "sms/pattern/normal/send";

#[derive(Debug, Default)]
struct PatternFields {
    code: Option<String>,
    status: Option<String>,
    template: Option<String>,
    is_shared: Option<bool>,
}

const PATTERN_FIELDS: &[FieldMapping<PatternFields>] = &[
    FieldMapping {
        sources: &["code"],
        apply: |out, value| out.code = text(value),
    },
    FieldMapping {
        sources: &["status"],
        apply: |out, value| out.status = text(value),
    },
    FieldMapping {
        sources: &["message", "pattern"],
        apply: |out, value| out.template = text(value),
    },
    FieldMapping {
        sources: &["is_shared"],
        apply: |out, value| out.is_shared = flag(value),
    },
];

pub fn encode_create_pattern(request: &CreatePattern) -> RequestSpec {
    let variables = request
        .variables()
        .iter()
        .map(|it| json!({ "name": it.name(), "type": it.kind() }))
        .collect::<Vec<_>>();

    RequestSpec::post(
        CREATE_PATH,
        json!({
            "pattern": request.template().as_str(),
            "description": request.description(),
            "delimiter": request.delimiter().as_str(),
            "variable": variables,
            "is_shared": request.is_shared(),
        }),
    )
}

pub fn encode_send_pattern(request: &SendPattern) -> RequestSpec {
    let values = request
        .values()
        .iter()
        .map(|(name, value)| (name.clone(), Value::String(value.clone())))
        .collect::<Map<_, _>>();

    RequestSpec::post(
        SEND_PATH,
        json!({
            "code": request.code().as_str(),
            "sender": request.sender().as_str(),
            "recipient": request.recipient().raw(),
            "variable": values,
        }),
    )
}

/// Payload is either a list whose first element is the pattern, or an object
/// holding it under `pattern`. The pattern must carry its `code`.
pub fn extract_pattern(envelope: Envelope) -> Result<PatternHandle, MalformedPayload> {
    let operation = Operation::CreatePattern;
    let record = match envelope.payload {
        Some(Value::Array(items)) => match items.into_iter().next() {
            Some(Value::Object(record)) => record,
            _ => return Err(operation.into()),
        },
        Some(Value::Object(mut data)) => match data.remove("pattern") {
            Some(Value::Object(record)) => record,
            _ => return Err(operation.into()),
        },
        _ => return Err(operation.into()),
    };

    let fields = project(&record, PATTERN_FIELDS);
    let code = fields
        .code
        .and_then(|it| PatternCode::new(it).ok())
        .ok_or(MalformedPayload::from(operation))?;

    Ok(PatternHandle {
        code,
        status: fields.status,
        template: fields.template,
        is_shared: fields.is_shared,
    })
}

/// Same shape as a plain send: an object with `bulk_id` or `message_id`.
pub fn extract_pattern_send_id(envelope: Envelope) -> Result<MessageId, MalformedPayload> {
    sent_id(envelope, Operation::SendPattern)
}
