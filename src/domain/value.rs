use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// IPPanel API key.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Header name used by IPPanel (`apikey`).
    pub const FIELD: &'static str = "apikey";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Originator line number (`sender`).
///
/// Invariant: non-empty after trimming. The line must be assigned to your account.
pub struct SenderNumber(String);

impl SenderNumber {
    /// Body field name used by IPPanel (`sender`).
    pub const FIELD: &'static str = "sender";

    /// Create a validated [`SenderNumber`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated recipient number as sent to IPPanel (`recipient`).
///
/// Invariant: non-empty after trimming. No format checks are made; the remote
/// service is the authority on which numbers it accepts. Parse into
/// [`PhoneNumber`] first if you want E.164 normalization.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Body field name used by IPPanel (`recipient`).
    pub const FIELD: &'static str = "recipient";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to IPPanel.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to a normalized raw value (E.164).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Body field name used by IPPanel (`recipient`).
    pub const FIELD: &'static str = "recipient";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Parse a number using Iran (`IR`) as the default region.
    pub fn parse_ir(input: impl Into<String>) -> Result<Self, ValidationError> {
        Self::parse(Some(country::Id::IR), input)
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message body text (`message`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Body field name used by IPPanel (`message`).
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifier of a sent message (bulk id).
///
/// IPPanel reports it as a JSON number in most responses and as a string in a
/// few older ones; both are kept in their textual form.
///
/// Invariant: non-empty after trimming.
pub struct MessageId(String);

impl MessageId {
    /// Query field name used by IPPanel (`message_id`).
    pub const FIELD: &'static str = "message_id";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the id in its textual form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id as an integer, when it is numeric.
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl From<u64> for MessageId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Pattern code issued by IPPanel when a pattern is created (`code`).
///
/// Invariant: non-empty after trimming.
pub struct PatternCode(String);

impl PatternCode {
    /// Body field name used by IPPanel (`code`).
    pub const FIELD: &'static str = "code";

    /// Create a validated [`PatternCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Pattern body with delimited variable placeholders, e.g. `%name% is awesome`.
///
/// Invariant: non-empty after trimming. The original value is preserved.
pub struct PatternTemplate(String);

impl PatternTemplate {
    /// Body field name used by IPPanel (`pattern`).
    pub const FIELD: &'static str = "pattern";

    /// Create a validated [`PatternTemplate`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the template as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Placeholder delimiter used inside a [`PatternTemplate`] (`delimiter`).
///
/// Invariant: non-empty. Defaults to `%`.
pub struct Delimiter(String);

impl Delimiter {
    /// Body field name used by IPPanel (`delimiter`).
    pub const FIELD: &'static str = "delimiter";

    /// Create a validated [`Delimiter`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self("%".to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Response code reported by IPPanel in the envelope `code` field.
///
/// Depending on the API generation this is either a JSON number (`200`, `422`)
/// or a string (`"OK"`, `"10006"`). The value is preserved as received.
pub enum ResponseCode {
    Numeric(i64),
    Text(String),
}

impl ResponseCode {
    /// Build a numeric code from an HTTP status.
    pub fn from_status(status: u16) -> Self {
        Self::Numeric(i64::from(status))
    }

    /// The integer value, parsing textual codes when they are numeric.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Numeric(value) => Some(*value),
            Self::Text(value) => value.trim().parse().ok(),
        }
    }

    /// Whether the code marks a successful call (`"OK"`, 200, 201 or 204).
    pub fn is_success_marker(&self) -> bool {
        if let Self::Text(value) = self {
            if value.trim().eq_ignore_ascii_case("ok") {
                return true;
            }
        }
        matches!(self.as_i64(), Some(200 | 201 | 204))
    }

    /// Map this code to a known response code variant, if one exists.
    pub fn known(&self) -> Option<KnownResponseCode> {
        self.as_i64().and_then(KnownResponseCode::from_code)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known IPPanel error codes.
///
/// Unknown codes are preserved as [`ResponseCode`] and return `None` from
/// [`KnownResponseCode::from_code`].
pub enum KnownResponseCode {
    Credential,
    MessageBodyIsEmpty,
    UserLimited,
    NumberNotAssignedToYou,
    RecipientsEmpty,
    CreditNotEnough,
    NumberNotProfitForBulkSend,
    NumberDeactivatedTemporarily,
    MaximumRecipientExceeded,
    GatewayOffline,
    NoPricing,
    TicketIsInvalid,
    AccessDenied,
    PatternIsInvalid,
    PatternParametersInvalid,
    PatternIsInactive,
    PatternRecipientInvalid,
    OutsideSendingHours,
    DocumentsNotApproved,
    Internal,
    NumberNotFound,
    GatewayDisabled,
    UnprocessableEntity,
    Unauthorized,
    KeyNotValid,
    KeyRevoked,
}

impl KnownResponseCode {
    /// Convert a raw integer code into a known variant.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            10001 => Self::Credential,
            10002 => Self::MessageBodyIsEmpty,
            10003 => Self::UserLimited,
            10004 => Self::NumberNotAssignedToYou,
            10005 => Self::RecipientsEmpty,
            10006 => Self::CreditNotEnough,
            10007 => Self::NumberNotProfitForBulkSend,
            10008 => Self::NumberDeactivatedTemporarily,
            10009 => Self::MaximumRecipientExceeded,
            10010 => Self::GatewayOffline,
            10011 => Self::NoPricing,
            10012 => Self::TicketIsInvalid,
            10013 => Self::AccessDenied,
            10014 => Self::PatternIsInvalid,
            10015 => Self::PatternParametersInvalid,
            10016 => Self::PatternIsInactive,
            10017 => Self::PatternRecipientInvalid,
            10019 => Self::OutsideSendingHours,
            10021 => Self::DocumentsNotApproved,
            10022 => Self::Internal,
            10023 => Self::NumberNotFound,
            10024 => Self::GatewayDisabled,
            422 => Self::UnprocessableEntity,
            1401 => Self::Unauthorized,
            1402 => Self::KeyNotValid,
            1403 => Self::KeyRevoked,
            _ => return None,
        })
    }

    /// The wire value of this code.
    pub fn code(self) -> i64 {
        match self {
            Self::Credential => 10001,
            Self::MessageBodyIsEmpty => 10002,
            Self::UserLimited => 10003,
            Self::NumberNotAssignedToYou => 10004,
            Self::RecipientsEmpty => 10005,
            Self::CreditNotEnough => 10006,
            Self::NumberNotProfitForBulkSend => 10007,
            Self::NumberDeactivatedTemporarily => 10008,
            Self::MaximumRecipientExceeded => 10009,
            Self::GatewayOffline => 10010,
            Self::NoPricing => 10011,
            Self::TicketIsInvalid => 10012,
            Self::AccessDenied => 10013,
            Self::PatternIsInvalid => 10014,
            Self::PatternParametersInvalid => 10015,
            Self::PatternIsInactive => 10016,
            Self::PatternRecipientInvalid => 10017,
            Self::OutsideSendingHours => 10019,
            Self::DocumentsNotApproved => 10021,
            Self::Internal => 10022,
            Self::NumberNotFound => 10023,
            Self::GatewayDisabled => 10024,
            Self::UnprocessableEntity => 422,
            Self::Unauthorized => 1401,
            Self::KeyNotValid => 1402,
            Self::KeyRevoked => 1403,
        }
    }

    /// Whether this code indicates a missing, invalid or revoked credential.
    pub fn is_auth_error(self) -> bool {
        matches!(
            self,
            Self::Credential | Self::Unauthorized | Self::KeyNotValid | Self::KeyRevoked
        )
    }

    /// Whether this code carries per-field validation messages.
    pub fn is_validation(self) -> bool {
        matches!(self, Self::UnprocessableEntity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let key = ApiKey::new("  key ").unwrap();
        assert_eq!(key.as_str(), "key");
        assert!(ApiKey::new("  ").is_err());

        let sender = SenderNumber::new(" +9810001 ").unwrap();
        assert_eq!(sender.as_str(), "+9810001");
        assert!(SenderNumber::new("").is_err());

        let msg = MessageText::new(" hi ").unwrap();
        assert_eq!(msg.as_str(), " hi ");
        assert!(MessageText::new("  ").is_err());

        let code = PatternCode::new(" 6gr7ngjmhi ").unwrap();
        assert_eq!(code.as_str(), "6gr7ngjmhi");
        assert!(PatternCode::new(" ").is_err());

        let template = PatternTemplate::new("%name% is awesome").unwrap();
        assert_eq!(template.as_str(), "%name% is awesome");
        assert!(PatternTemplate::new("\n").is_err());

        assert_eq!(Delimiter::default().as_str(), "%");
        assert!(Delimiter::new("").is_err());
    }

    #[test]
    fn message_id_keeps_text_and_parses_numbers() {
        let id = MessageId::new(" 70671101 ").unwrap();
        assert_eq!(id.as_str(), "70671101");
        assert_eq!(id.as_u64(), Some(70671101));
        assert_eq!(MessageId::from(42).to_string(), "42");

        let opaque = MessageId::new("abc-1").unwrap();
        assert_eq!(opaque.as_u64(), None);
        assert!(MessageId::new("").is_err());
    }

    #[test]
    fn raw_phone_number_trims_and_exposes_raw() {
        let raw = RawPhoneNumber::new(" +98912xxxxxxx ").unwrap();
        assert_eq!(raw.raw(), "+98912xxxxxxx");
        assert!(RawPhoneNumber::new("").is_err());
    }

    #[test]
    fn phone_number_parsing_and_equality_use_e164() {
        let p1 = PhoneNumber::parse(None, "+989121234567").unwrap();
        let p2 = PhoneNumber::parse_ir("09121234567").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+989121234567");
        assert_eq!(p2.raw(), "09121234567");

        let raw: RawPhoneNumber = p2.into();
        assert_eq!(raw.raw(), "+989121234567");
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
    }

    #[test]
    fn response_code_success_markers() {
        assert!(ResponseCode::Text("OK".to_owned()).is_success_marker());
        assert!(ResponseCode::Text("ok".to_owned()).is_success_marker());
        assert!(ResponseCode::Numeric(200).is_success_marker());
        assert!(ResponseCode::Text("201".to_owned()).is_success_marker());
        assert!(!ResponseCode::Numeric(422).is_success_marker());
        assert!(!ResponseCode::Text("10006".to_owned()).is_success_marker());
    }

    #[test]
    fn response_code_known_mapping() {
        let text = ResponseCode::Text("10006".to_owned());
        assert_eq!(text.known(), Some(KnownResponseCode::CreditNotEnough));
        assert_eq!(text.to_string(), "10006");

        let numeric = ResponseCode::from_status(422);
        assert_eq!(numeric.known(), Some(KnownResponseCode::UnprocessableEntity));
        assert!(KnownResponseCode::UnprocessableEntity.is_validation());

        assert_eq!(ResponseCode::Numeric(999_999).known(), None);
        assert_eq!(ResponseCode::Text("OK".to_owned()).known(), None);
    }

    #[test]
    fn known_codes_round_trip_and_classify() {
        for code in [10001, 10006, 10019, 10024, 422, 1401, 1402, 1403] {
            let known = KnownResponseCode::from_code(code).unwrap();
            assert_eq!(known.code(), code);
        }
        assert_eq!(KnownResponseCode::from_code(10018), None);

        assert!(KnownResponseCode::KeyRevoked.is_auth_error());
        assert!(KnownResponseCode::Credential.is_auth_error());
        assert!(!KnownResponseCode::CreditNotEnough.is_auth_error());
    }
}
