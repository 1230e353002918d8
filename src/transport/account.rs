use serde_json::Value;

use super::projection::amount;
use super::{MalformedPayload, RequestSpec};
use crate::domain::{CreditBalance, Operation};
use crate::transport::envelope::Envelope;

const CREDIT_PATH: &str = "sms/accounting/credit/show";

pub fn encode_get_credit() -> RequestSpec {
    RequestSpec::get(CREDIT_PATH)
}

/// Payload must be an object with a numeric `credit`.
pub fn extract_credit(envelope: Envelope) -> Result<CreditBalance, MalformedPayload> {
    match envelope.payload {
        Some(Value::Object(data)) => data
            .get("credit")
            .and_then(amount)
            .map(CreditBalance::new)
            .ok_or(MalformedPayload::from(Operation::GetCredit)),
        _ => Err(Operation::GetCredit.into()),
    }
}
