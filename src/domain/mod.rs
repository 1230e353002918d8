//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    CreatePattern, DEFAULT_PAGE_SIZE, FetchStatuses, Operation, PageRequest, PatternVariable,
    SendMessage, SendPattern,
};
pub use response::{
    CreditBalance, DeliveryStatus, ErrorDetail, InboxEntry, MessageRecord, PageCursor,
    Paginated, PaginationInfo, PatternHandle,
};
pub use validation::ValidationError;
pub use value::{
    ApiKey, Delimiter, KnownResponseCode, MessageId, MessageText, PatternCode, PatternTemplate,
    PhoneNumber, RawPhoneNumber, ResponseCode, SenderNumber,
};
