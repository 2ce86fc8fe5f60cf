//! Provider adapter contracts and the source-level error taxonomy.
//!
//! | Trait | Input | Output | Providers |
//! |-------|-------|--------|-----------|
//! | [`AddressSource`] | [`Cep`] | [`Address`] | ViaCEP, BrasilAPI |
//! | [`WeatherSource`] | city name | [`Temperature`] | WeatherAPI |
//!
//! Each adapter splits its work into `build_request` (pure), the HTTP call,
//! and `parse_response` (pure). The parse step always ends in the shared
//! normalizer, so every adapter of one kind yields the same output shape.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::http_client::{HttpClient, HttpRequest, HttpResponse};
use crate::{Address, Cep, ProviderId, Temperature};

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Provider does not know the CEP, or its record lacks a mandatory field.
    NotFound,
    /// Payload could not be decoded.
    Parse,
    /// Network or connection failure, including the per-request timeout.
    Transport,
    /// Provider answered with an unexpected non-2xx status.
    Upstream,
    Internal,
}

/// Structured source error reported by adapters and aggregated by the race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Parse,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn transport(message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
            retryable,
        }
    }

    pub fn upstream(message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind: SourceErrorKind::Upstream,
            message: message.into(),
            retryable,
        }
    }

    pub fn upstream_status(provider: ProviderId, status: u16) -> Self {
        Self::upstream(
            format!("{provider} upstream returned status {status}"),
            status >= 500,
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind, SourceErrorKind::NotFound)
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::Parse => "source.parse",
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::Upstream => "source.upstream",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Adapter contract for providers that resolve a CEP into an [`Address`].
///
/// Implementations hold configuration only (base URL, request timeout and a
/// shared transport) and must be `Send + Sync`: the race moves one `Arc` of
/// each source into its own task.
pub trait AddressSource: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Builds the provider request for an already validated CEP.
    fn build_request(&self, cep: &Cep) -> HttpRequest;

    /// Decodes a 2xx body and runs it through the address normalizer.
    ///
    /// # Errors
    ///
    /// - `Parse` if the body is not the provider's JSON shape
    /// - `NotFound` if a mandatory field is empty
    fn parse_response(&self, body: &str) -> Result<Address, SourceError>;

    /// Full lookup: build, send, classify the status, parse.
    fn lookup<'a>(&'a self, cep: &'a Cep) -> SourceFuture<'a, Address>;
}

/// Adapter contract for providers that report the current temperature of a city.
pub trait WeatherSource: Send + Sync {
    fn id(&self) -> ProviderId;

    fn build_request(&self, city: &str) -> HttpRequest;

    fn parse_response(&self, body: &str) -> Result<Temperature, SourceError>;

    fn current<'a>(&'a self, city: &'a str) -> SourceFuture<'a, Temperature>;
}

/// Sends one request and maps transport failures into [`SourceError`].
pub(crate) async fn send(
    provider: ProviderId,
    http_client: &dyn HttpClient,
    request: HttpRequest,
) -> Result<HttpResponse, SourceError> {
    http_client.execute(request).await.map_err(|error| {
        SourceError::transport(
            format!("{provider} transport error: {}", error.message()),
            error.retryable(),
        )
    })
}

/// Lookup flow shared by every [`AddressSource`].
///
/// A 404 means the provider does not know the CEP; any other non-2xx status is
/// an upstream fault and never reaches the parser.
pub(crate) async fn lookup_address<S>(
    source: &S,
    http_client: &dyn HttpClient,
    cep: &Cep,
) -> Result<Address, SourceError>
where
    S: AddressSource + ?Sized,
{
    let provider = source.id();
    let response = send(provider, http_client, source.build_request(cep)).await?;

    if response.status == 404 {
        return Err(SourceError::not_found(format!(
            "{provider} does not know cep {cep}"
        )));
    }
    if !response.is_success() {
        return Err(SourceError::upstream_status(provider, response.status));
    }

    source.parse_response(&response.body)
}
