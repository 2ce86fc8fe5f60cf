use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{send, SourceError, SourceFuture, WeatherSource};
use crate::http_client::{HttpClient, HttpRequest, DEFAULT_REQUEST_TIMEOUT_MS};
use crate::{ProviderId, Temperature};

/// WeatherAPI current-conditions adapter (`GET {base}?key={key}&q={city}`).
///
/// The API key is injected at construction and never appears in `Debug`
/// output or error messages.
#[derive(Clone)]
pub struct WeatherApiAdapter {
    base_url: String,
    api_key: String,
    timeout_ms: u64,
    http_client: Arc<dyn HttpClient>,
}

impl WeatherApiAdapter {
    pub const DEFAULT_BASE_URL: &'static str = "http://api.weatherapi.com/v1/current.json";

    pub fn new(http_client: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: String::from(Self::DEFAULT_BASE_URL),
            api_key: api_key.into(),
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            http_client,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl WeatherSource for WeatherApiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::WeatherApi
    }

    fn build_request(&self, city: &str) -> HttpRequest {
        HttpRequest::get(format!(
            "{}?key={}&q={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(city)
        ))
        .with_header("accept", "application/json")
        .with_timeout_ms(self.timeout_ms)
    }

    fn parse_response(&self, body: &str) -> Result<Temperature, SourceError> {
        let payload: WeatherApiPayload = serde_json::from_str(body).map_err(|e| {
            SourceError::parse(format!("failed to parse weatherapi response: {e}"))
        })?;

        Ok(Temperature::from_celsius(payload.current.temp_c))
    }

    fn current<'a>(&'a self, city: &'a str) -> SourceFuture<'a, Temperature> {
        Box::pin(async move {
            let provider = self.id();
            let response = send(provider, self.http_client.as_ref(), self.build_request(city)).await?;

            if !response.is_success() {
                let detail = serde_json::from_str::<WeatherApiErrorBody>(&response.body)
                    .ok()
                    .map(|body| body.error.message);
                return Err(match detail {
                    Some(message) => SourceError::upstream(
                        format!(
                            "{provider} upstream returned status {}: {message}",
                            response.status
                        ),
                        response.status >= 500,
                    ),
                    None => SourceError::upstream_status(provider, response.status),
                });
            }

            self.parse_response(&response.body)
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct WeatherApiPayload {
    current: WeatherApiCurrent,
}

#[derive(Debug, Clone, Deserialize)]
struct WeatherApiCurrent {
    temp_c: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct WeatherApiErrorBody {
    error: WeatherApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
struct WeatherApiErrorDetail {
    message: String,
}
