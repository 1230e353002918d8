//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod error;
mod http;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

pub use error::{IppanelError, TransportError};
pub use http::{BoxFuture, HttpRequest, HttpResponse, HttpTransport, Method};

use crate::domain::{
    ApiKey, CreatePattern, CreditBalance, DeliveryStatus, FetchStatuses, InboxEntry, MessageId,
    MessageRecord, PageRequest, Paginated, PatternHandle, SendMessage, SendPattern,
    ValidationError,
};
use crate::transport::{Envelope, EnvelopeError, MalformedPayload, Rejection, RequestSpec};
use http::ReqwestTransport;

const DEFAULT_BASE_URL: &str = "https://api2.ippanel.com/api/v1/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_KEY_ENV: &str = "IPPANEL_API_KEY";
const BASE_URL_ENV: &str = "IPPANEL_BASE_URL";
const TIMEOUT_ENV: &str = "IPPANEL_TIMEOUT_SECS";

#[derive(Debug, Clone)]
/// Builder for [`IppanelClient`].
///
/// Use this when you need to customize the base address, timeout, or user-agent.
pub struct IppanelClientBuilder {
    api_key: ApiKey,
    base_url: String,
    timeout: Duration,
    client_version: String,
    user_agent: Option<String>,
}

impl IppanelClientBuilder {
    /// Create a builder with the default base address and a 30 second timeout.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            client_version: env!("CARGO_PKG_VERSION").to_owned(),
            user_agent: None,
        }
    }

    /// Read settings from the environment.
    ///
    /// `IPPANEL_API_KEY` is required. `IPPANEL_BASE_URL` and
    /// `IPPANEL_TIMEOUT_SECS` are optional; values that do not parse are ignored.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ValidationError> {
        let api_key = ApiKey::new(lookup(API_KEY_ENV).unwrap_or_default())?;
        let mut builder = Self::new(api_key);

        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|it| !it.trim().is_empty()) {
            builder = builder.base_url(base_url.trim());
        }
        if let Some(secs) = lookup(TIMEOUT_ENV).and_then(|it| it.trim().parse::<u64>().ok()) {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder)
    }

    /// Override the API base address. Operation paths are resolved under it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout applied to each entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Version tag reported in the default `User-Agent`.
    pub fn client_version(mut self, version: impl Into<String>) -> Self {
        self.client_version = version.into();
        self
    }

    /// Override the HTTP `User-Agent` header entirely.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`IppanelClient`] backed by `reqwest`.
    pub fn build(self) -> Result<IppanelClient, IppanelError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| TransportError::Request(Box::new(err)))?;
        self.build_with_transport(Arc::new(ReqwestTransport { client }))
    }

    /// Build an [`IppanelClient`] that sends requests through `transport`.
    ///
    /// The timeout setting is not applied; enforcing it is up to `transport`.
    pub fn build_with_transport(
        self,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<IppanelClient, IppanelError> {
        let base_url = parse_base_url(&self.base_url)?;
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("IPPanel/ApiClient/{} Rust", self.client_version));

        Ok(IppanelClient {
            api_key: self.api_key,
            base_url,
            user_agent,
            http: transport,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let raw = raw.trim();
    if raw.ends_with('/') {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{raw}/"))
    }
}

#[derive(Clone)]
/// High-level IPPanel client.
///
/// Every operation is one HTTP round trip: the request is encoded, sent, its
/// envelope decoded and classified, and the operation's payload extracted.
/// Nothing is retried and no state is shared between calls, so a client can be
/// cloned and used concurrently.
pub struct IppanelClient {
    api_key: ApiKey,
    base_url: Url,
    user_agent: String,
    http: Arc<dyn HttpTransport>,
}

impl IppanelClient {
    /// Create a client with default settings.
    ///
    /// For more customization, use [`IppanelClient::builder`].
    pub fn new(api_key: ApiKey) -> Result<Self, IppanelError> {
        IppanelClientBuilder::new(api_key).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> IppanelClientBuilder {
        IppanelClientBuilder::new(api_key)
    }

    /// Current account credit.
    pub async fn get_credit(&self) -> Result<CreditBalance, IppanelError> {
        let envelope = self.call(crate::transport::encode_get_credit()).await?;
        extracted(crate::transport::extract_credit(envelope))
    }

    /// Send one message to many recipients; returns the bulk id.
    pub async fn send(&self, request: SendMessage) -> Result<MessageId, IppanelError> {
        let envelope = self.call(crate::transport::encode_send(&request)).await?;
        extracted(crate::transport::extract_sent_id(envelope))
    }

    /// Summary of a previously sent message.
    pub async fn get_message(&self, message_id: &MessageId) -> Result<MessageRecord, IppanelError> {
        let envelope = self
            .call(crate::transport::encode_get_message(message_id))
            .await?;
        extracted(crate::transport::extract_message(envelope))
    }

    /// One page of per-recipient delivery states for a message.
    pub async fn fetch_statuses(
        &self,
        request: FetchStatuses,
    ) -> Result<Paginated<DeliveryStatus>, IppanelError> {
        let envelope = self
            .call(crate::transport::encode_fetch_statuses(&request))
            .await?;
        extracted(crate::transport::extract_statuses(envelope))
    }

    /// One page of messages received on the account lines.
    pub async fn fetch_inbox(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<InboxEntry>, IppanelError> {
        let envelope = self.call(crate::transport::encode_fetch_inbox(page)).await?;
        extracted(crate::transport::extract_inbox(envelope))
    }

    /// Register a new pattern. It usually starts out pending review.
    pub async fn create_pattern(
        &self,
        request: CreatePattern,
    ) -> Result<PatternHandle, IppanelError> {
        let envelope = self
            .call(crate::transport::encode_create_pattern(&request))
            .await?;
        extracted(crate::transport::extract_pattern(envelope))
    }

    /// Send a pattern message to one recipient; returns the bulk id.
    pub async fn send_pattern(&self, request: SendPattern) -> Result<MessageId, IppanelError> {
        let envelope = self
            .call(crate::transport::encode_send_pattern(&request))
            .await?;
        extracted(crate::transport::extract_pattern_send_id(envelope))
    }

    async fn call(&self, spec: RequestSpec) -> Result<Envelope, IppanelError> {
        let url = resolve_url(&self.base_url, &spec)?;
        let has_body = spec.method.has_body();
        let request = HttpRequest {
            method: spec.method,
            url,
            headers: self.headers(),
            query: if has_body { Vec::new() } else { spec.query },
            body: if has_body { spec.body } else { None },
        };

        debug!(method = request.method.as_str(), url = %request.url, "sending IPPanel request");
        let response = self.http.execute(request).await.map_err(|err| {
            debug!(error = %err, "IPPanel request failed");
            TransportError::Request(err)
        })?;
        debug!(
            status = response.status,
            body_len = response.body.len(),
            "received IPPanel response"
        );

        interpret(response)
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Content-Type".to_owned(), "application/json".to_owned()),
            ("Accept".to_owned(), "application/json".to_owned()),
            (ApiKey::FIELD.to_owned(), self.api_key.as_str().to_owned()),
            ("User-Agent".to_owned(), self.user_agent.clone()),
        ]
    }
}

/// Join the operation path under the base address, then append each dynamic
/// segment percent-encoded so ids cannot add segments, a query or a fragment.
fn resolve_url(base_url: &Url, spec: &RequestSpec) -> Result<Url, url::ParseError> {
    let mut url = base_url.join(&spec.path)?;
    if !spec.segments.is_empty() {
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(&spec.segments);
    }
    Ok(url)
}

fn interpret(response: HttpResponse) -> Result<Envelope, IppanelError> {
    let envelope = match crate::transport::decode_envelope(&response.body) {
        Ok(envelope) => envelope,
        Err(EnvelopeError::Json(source)) => {
            if crate::transport::is_recognized_status(response.status) {
                return Err(TransportError::InvalidBody {
                    status: response.status,
                    source,
                }
                .into());
            }
            return Err(unexpected_status(response));
        }
    };

    match crate::transport::classify(response.status, &envelope) {
        None => Ok(envelope),
        Some(Rejection::Api { code, detail }) => {
            debug!(status = response.status, %code, "IPPanel rejected the request");
            Err(IppanelError::Api { code, detail })
        }
        Some(Rejection::UnexpectedStatus { .. }) => Err(unexpected_status(response)),
    }
}

fn unexpected_status(response: HttpResponse) -> IppanelError {
    let body = if response.body.trim().is_empty() {
        None
    } else {
        Some(response.body)
    };
    TransportError::UnexpectedStatus {
        status: response.status,
        body,
    }
    .into()
}

fn extracted<T>(result: Result<T, MalformedPayload>) -> Result<T, IppanelError> {
    result.map_err(|err| {
        warn!(
            operation = %err.operation,
            "IPPanel response payload does not have the expected shape"
        );
        err.into()
    })
}
