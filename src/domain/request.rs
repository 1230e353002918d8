use std::collections::BTreeMap;

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    Delimiter, MessageId, MessageText, PatternCode, PatternTemplate, RawPhoneNumber, SenderNumber,
};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Zero-based page selector for list operations (`page`, `per_page`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub const PAGE_FIELD: &'static str = "page";
    pub const LIMIT_FIELD: &'static str = "per_page";

    pub fn new(page: u32, limit: u32) -> Result<Self, ValidationError> {
        if limit == 0 {
            return Err(ValidationError::Zero {
                field: Self::LIMIT_FIELD,
            });
        }
        Ok(Self { page, limit })
    }

    pub fn page(self) -> u32 {
        self.page
    }

    pub fn limit(self) -> u32 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SendMessage {
    sender: SenderNumber,
    recipients: Vec<RawPhoneNumber>,
    message: MessageText,
    summary: Option<String>,
}

impl SendMessage {
    pub fn new(
        sender: SenderNumber,
        recipients: Vec<RawPhoneNumber>,
        message: MessageText,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        Ok(Self {
            sender,
            recipients,
            message,
            summary: None,
        })
    }

    /// Attach a free-text summary that IPPanel logs with the message.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn sender(&self) -> &SenderNumber {
        &self.sender
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct FetchStatuses {
    message_id: MessageId,
    page: PageRequest,
}

impl FetchStatuses {
    pub fn new(message_id: MessageId, page: PageRequest) -> Self {
        Self { message_id, page }
    }

    /// First page with the default page size.
    pub fn first_page(message_id: MessageId) -> Self {
        Self::new(message_id, PageRequest::default())
    }

    pub fn message_id(&self) -> &MessageId {
        &self.message_id
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }
}

/// A placeholder declared by a pattern, with its IPPanel value type
/// (for example `string` or `integer`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternVariable {
    name: String,
    kind: String,
}

impl PatternVariable {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        let kind = kind.into().trim().to_owned();
        if kind.is_empty() {
            return Err(ValidationError::Empty { field: "type" });
        }
        Ok(Self { name, kind })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

#[derive(Debug, Clone)]
pub struct CreatePattern {
    template: PatternTemplate,
    description: Option<String>,
    variables: Vec<PatternVariable>,
    delimiter: Delimiter,
    is_shared: bool,
}

impl CreatePattern {
    /// Declare a pattern. Variable names must be unique; declaration order is kept.
    pub fn new(
        template: PatternTemplate,
        variables: Vec<PatternVariable>,
    ) -> Result<Self, ValidationError> {
        for (idx, variable) in variables.iter().enumerate() {
            if variables[..idx].iter().any(|it| it.name == variable.name) {
                return Err(ValidationError::DuplicateVariable {
                    name: variable.name.clone(),
                });
            }
        }
        Ok(Self {
            template,
            description: None,
            variables,
            delimiter: Delimiter::default(),
            is_shared: false,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn shared(mut self, is_shared: bool) -> Self {
        self.is_shared = is_shared;
        self
    }

    pub fn template(&self) -> &PatternTemplate {
        &self.template
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn variables(&self) -> &[PatternVariable] {
        &self.variables
    }

    pub fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    pub fn is_shared(&self) -> bool {
        self.is_shared
    }
}

#[derive(Debug, Clone)]
pub struct SendPattern {
    code: PatternCode,
    sender: SenderNumber,
    recipient: RawPhoneNumber,
    values: BTreeMap<String, String>,
}

impl SendPattern {
    pub fn new(
        code: PatternCode,
        sender: SenderNumber,
        recipient: RawPhoneNumber,
        values: BTreeMap<String, String>,
    ) -> Self {
        Self {
            code,
            sender,
            recipient,
            values,
        }
    }

    pub fn code(&self) -> &PatternCode {
        &self.code
    }

    pub fn sender(&self) -> &SenderNumber {
        &self.sender
    }

    pub fn recipient(&self) -> &RawPhoneNumber {
        &self.recipient
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// Facade operation, used to name the call a malformed payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetCredit,
    Send,
    GetMessage,
    FetchStatuses,
    FetchInbox,
    CreatePattern,
    SendPattern,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetCredit => "get_credit",
            Self::Send => "send",
            Self::GetMessage => "get_message",
            Self::FetchStatuses => "fetch_statuses",
            Self::FetchInbox => "fetch_inbox",
            Self::CreatePattern => "create_pattern",
            Self::SendPattern => "send_pattern",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
