use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{lookup_address, AddressSource, SourceError, SourceFuture};
use crate::http_client::{HttpClient, HttpRequest, DEFAULT_REQUEST_TIMEOUT_MS};
use crate::normalize::{normalize_address, RawAddress};
use crate::{Address, Cep, ProviderId};

/// ViaCEP address adapter (`GET {base}/{cep}/json/`).
#[derive(Clone)]
pub struct ViaCepAdapter {
    base_url: String,
    timeout_ms: u64,
    http_client: Arc<dyn HttpClient>,
}

impl ViaCepAdapter {
    pub const DEFAULT_BASE_URL: &'static str = "http://viacep.com.br/ws";

    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: String::from(Self::DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            http_client,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl AddressSource for ViaCepAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::ViaCep
    }

    fn build_request(&self, cep: &Cep) -> HttpRequest {
        HttpRequest::get(format!("{}/{}/json/", self.base_url, cep))
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms)
    }

    fn parse_response(&self, body: &str) -> Result<Address, SourceError> {
        let payload: ViaCepPayload = serde_json::from_str(body)
            .map_err(|e| SourceError::parse(format!("failed to parse viacep response: {e}")))?;

        // Unknown CEPs come back as `{"erro": true}`; with no city or state
        // they fall out of the normalizer as NotFound.
        normalize_address(
            RawAddress {
                cep: payload.cep,
                street: payload.logradouro,
                neighborhood: payload.bairro,
                city: payload.localidade,
                state: payload.uf,
            },
            ProviderId::ViaCep,
        )
    }

    fn lookup<'a>(&'a self, cep: &'a Cep) -> SourceFuture<'a, Address> {
        Box::pin(lookup_address(self, self.http_client.as_ref(), cep))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ViaCepPayload {
    #[serde(default)]
    cep: Option<String>,
    #[serde(default)]
    logradouro: Option<String>,
    #[serde(default)]
    bairro: Option<String>,
    #[serde(default)]
    localidade: Option<String>,
    #[serde(default)]
    uf: Option<String>,
}
