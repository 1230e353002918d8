//! Typed Rust client for the IPPanel SMS REST API.
//!
//! The crate is split in three layers: a domain layer of strong types, a
//! transport layer for the response envelope and its wire-format quirks, and a
//! small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use ippanel::{ApiKey, IppanelClient, MessageText, RawPhoneNumber, SendMessage, SenderNumber};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ippanel::IppanelError> {
//!     let client = IppanelClient::new(ApiKey::new("...")?)?;
//!     let request = SendMessage::new(
//!         SenderNumber::new("+9810001")?,
//!         vec![RawPhoneNumber::new("98912xxxxxxx")?],
//!         MessageText::new("hello")?,
//!     )?;
//!     let bulk_id = client.send(request).await?;
//!     println!("queued as {bulk_id}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{IppanelClient, IppanelClientBuilder, IppanelError, TransportError};
pub use domain::{
    ApiKey, CreatePattern, CreditBalance, Delimiter, DeliveryStatus, ErrorDetail, FetchStatuses,
    InboxEntry, KnownResponseCode, MessageId, MessageRecord, MessageText, Operation, PageCursor,
    PageRequest, Paginated, PaginationInfo, PatternCode, PatternHandle, PatternTemplate,
    PatternVariable, PhoneNumber, RawPhoneNumber, ResponseCode, SendMessage, SendPattern,
    SenderNumber, ValidationError,
};
