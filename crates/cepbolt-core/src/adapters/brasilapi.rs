use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{lookup_address, AddressSource, SourceError, SourceFuture};
use crate::http_client::{HttpClient, HttpRequest, DEFAULT_REQUEST_TIMEOUT_MS};
use crate::normalize::{normalize_address, RawAddress};
use crate::{Address, Cep, ProviderId};

/// BrasilAPI CEP v1 adapter (`GET {base}/{cep}`).
#[derive(Clone)]
pub struct BrasilApiAdapter {
    base_url: String,
    timeout_ms: u64,
    http_client: Arc<dyn HttpClient>,
}

impl BrasilApiAdapter {
    pub const DEFAULT_BASE_URL: &'static str = "https://brasilapi.com.br/api/cep/v1";

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

impl AddressSource for BrasilApiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::BrasilApi
    }

    fn build_request(&self, cep: &Cep) -> HttpRequest {
        HttpRequest::get(format!("{}/{}", self.base_url, cep))
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms)
    }

    fn parse_response(&self, body: &str) -> Result<Address, SourceError> {
        let payload: BrasilApiPayload = serde_json::from_str(body).map_err(|e| {
            SourceError::parse(format!("failed to parse brasilapi response: {e}"))
        })?;

        normalize_address(
            RawAddress {
                cep: payload.cep,
                street: payload.street,
                neighborhood: payload.neighborhood,
                city: payload.city,
                state: payload.state,
            },
            ProviderId::BrasilApi,
        )
    }

    fn lookup<'a>(&'a self, cep: &'a Cep) -> SourceFuture<'a, Address> {
        Box::pin(lookup_address(self, self.http_client.as_ref(), cep))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct BrasilApiPayload {
    #[serde(default)]
    cep: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    neighborhood: Option<String>,
    #[serde(default)]
    street: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ViaCepAdapter;
    use crate::data_source::SourceErrorKind;
    use crate::http_client::{HttpError, HttpResponse};
    use std::future::Future;
    use std::pin::Pin;

    struct FixedHttpClient(HttpResponse);

    impl HttpClient for FixedHttpClient {
        fn execute<'a>(
            &'a self,
            _request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            let response = self.0.clone();
            Box::pin(async move { Ok(response) })
        }
    }

    fn adapter_replying(response: HttpResponse) -> BrasilApiAdapter {
        BrasilApiAdapter::new(Arc::new(FixedHttpClient(response)))
    }

    #[test]
    fn request_appends_cep_to_base_url() {
        let adapter = adapter_replying(HttpResponse::ok_json("{}"))
            .with_base_url("https://brasilapi.test/api/cep/v1");

        let request = adapter.build_request(&Cep::parse("89010025").expect("valid"));
        assert_eq!(request.url, "https://brasilapi.test/api/cep/v1/89010025");
    }

    #[test]
    fn english_fields_map_into_same_shape_as_viacep() {
        let adapter = adapter_replying(HttpResponse::ok_json("{}"));
        let brasilapi = adapter
            .parse_response(
                r#"{"cep":"01001000","state":"SP","city":"São Paulo","neighborhood":"Sé",
                    "street":"Praça da Sé","service":"open-cep"}"#,
            )
            .expect("valid payload");

        let viacep = ViaCepAdapter::new(Arc::new(FixedHttpClient(HttpResponse::ok_json("{}"))))
            .parse_response(
                r#"{"cep":"01001-000","logradouro":"Praça da Sé","bairro":"Sé",
                    "localidade":"São Paulo","uf":"SP"}"#,
            )
            .expect("valid payload");

        assert_eq!(brasilapi.source, ProviderId::BrasilApi);
        assert_eq!(viacep.source, ProviderId::ViaCep);
        assert_eq!(
            (&brasilapi.cep, &brasilapi.street, &brasilapi.neighborhood, &brasilapi.city, &brasilapi.state),
            (&viacep.cep, &viacep.street, &viacep.neighborhood, &viacep.city, &viacep.state)
        );
    }

    #[tokio::test]
    async fn unknown_cep_404_is_not_found() {
        let adapter = adapter_replying(HttpResponse::new(
            404,
            r#"{"name":"CepPromiseError","message":"Todos os serviços de CEP retornaram erro.","type":"service_error"}"#,
        ));

        let cep = Cep::parse("00000000").expect("valid");
        let error = adapter.lookup(&cep).await.expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::NotFound);
    }

    #[tokio::test]
    async fn rate_limit_status_is_upstream_error() {
        let adapter = adapter_replying(HttpResponse::new(429, "{}"));

        let cep = Cep::parse("01001000").expect("valid");
        let error = adapter.lookup(&cep).await.expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::Upstream);
        assert!(!error.retryable());
    }

    #[test]
    fn wrong_json_shape_is_parse_error() {
        let adapter = adapter_replying(HttpResponse::ok_json("{}"));

        let error = adapter
            .parse_response(r#"{"city": 42}"#)
            .expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::Parse);
    }
}
