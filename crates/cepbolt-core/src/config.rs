use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{BrasilApiAdapter, ViaCepAdapter, WeatherApiAdapter};
use crate::data_source::{AddressSource, WeatherSource};
use crate::http_client::{HttpClient, ReqwestHttpClient, DEFAULT_REQUEST_TIMEOUT_MS};
use crate::race::{AddressRace, DEFAULT_RACE_DEADLINE};
use crate::{LookupPipeline, ProviderId, ValidationError};

/// Configured adapters, ready to build races and pipelines.
#[derive(Clone)]
pub struct ProviderSet {
    address_sources: Vec<Arc<dyn AddressSource>>,
    weather: Arc<dyn WeatherSource>,
    race_deadline: Duration,
    weather_key_configured: bool,
}

impl ProviderSet {
    /// New coordinator over every enabled address provider.
    pub fn race(&self) -> AddressRace {
        AddressRace::new(self.address_sources.clone(), self.race_deadline)
    }

    /// Pipeline whose first stage uses the first enabled address provider.
    pub fn pipeline(&self) -> LookupPipeline {
        LookupPipeline::new(Arc::clone(&self.address_sources[0]), Arc::clone(&self.weather))
    }

    pub fn address_providers(&self) -> Vec<ProviderId> {
        self.address_sources.iter().map(|source| source.id()).collect()
    }

    pub const fn race_deadline(&self) -> Duration {
        self.race_deadline
    }

    pub const fn weather_key_configured(&self) -> bool {
        self.weather_key_configured
    }
}

/// Builder for a [`ProviderSet`].
///
/// # Environment Variables
///
/// | Setting | Primary Env Var | Fallback Env Var |
/// |---------|-----------------|------------------|
/// | ViaCEP base URL | `CEPBOLT_VIACEP_URL` | - |
/// | BrasilAPI base URL | `CEPBOLT_BRASILAPI_URL` | - |
/// | WeatherAPI base URL | `CEPBOLT_WEATHER_URL` | - |
/// | WeatherAPI key | `CEPBOLT_WEATHER_API_KEY` | `WEATHER_API_KEY` |
/// | Race deadline (ms) | `CEPBOLT_RACE_DEADLINE_MS` | - |
/// | Request timeout (ms) | `CEPBOLT_REQUEST_TIMEOUT_MS` | - |
///
/// # Example
///
/// ```rust,ignore
/// use cepbolt_core::ProviderSetBuilder;
///
/// let providers = ProviderSetBuilder::new().with_env()?.build()?;
/// let outcome = providers.race().race(&cep).await;
/// ```
pub struct ProviderSetBuilder {
    http_client: Option<Arc<dyn HttpClient>>,
    providers: Vec<ProviderId>,
    viacep_url: String,
    brasilapi_url: String,
    weather_url: String,
    weather_api_key: Option<String>,
    race_deadline: Duration,
    request_timeout_ms: u64,
}

impl Default for ProviderSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderSetBuilder {
    pub fn new() -> Self {
        Self {
            http_client: None,
            providers: ProviderId::ADDRESS.to_vec(),
            viacep_url: String::from(ViaCepAdapter::DEFAULT_BASE_URL),
            brasilapi_url: String::from(BrasilApiAdapter::DEFAULT_BASE_URL),
            weather_url: String::from(WeatherApiAdapter::DEFAULT_BASE_URL),
            weather_api_key: None,
            race_deadline: DEFAULT_RACE_DEADLINE,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }

    /// Overlay settings from the process environment.
    pub fn with_env(self) -> Result<Self, ValidationError> {
        self.with_env_lookup(|name| env::var(name).ok())
    }

    /// Overlay settings from an arbitrary variable lookup.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CEPBOLT_VIACEP_URL") {
            self.viacep_url = url;
        }
        if let Some(url) = lookup("CEPBOLT_BRASILAPI_URL") {
            self.brasilapi_url = url;
        }
        if let Some(url) = lookup("CEPBOLT_WEATHER_URL") {
            self.weather_url = url;
        }
        if let Some(key) = lookup("CEPBOLT_WEATHER_API_KEY").or_else(|| lookup("WEATHER_API_KEY")) {
            self.weather_api_key = Some(key);
        }
        if let Some(raw) = lookup("CEPBOLT_RACE_DEADLINE_MS") {
            self.race_deadline =
                Duration::from_millis(parse_millis("CEPBOLT_RACE_DEADLINE_MS", &raw)?);
        }
        if let Some(raw) = lookup("CEPBOLT_REQUEST_TIMEOUT_MS") {
            self.request_timeout_ms = parse_millis("CEPBOLT_REQUEST_TIMEOUT_MS", &raw)?;
        }
        Ok(self)
    }

    /// Inject the transport shared by every adapter.
    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Address providers to race, in pipeline preference order. Duplicates are dropped.
    pub fn with_providers(mut self, providers: impl IntoIterator<Item = ProviderId>) -> Self {
        let mut chosen = Vec::new();
        for provider in providers {
            if !chosen.contains(&provider) {
                chosen.push(provider);
            }
        }
        self.providers = chosen;
        self
    }

    pub fn with_viacep_url(mut self, url: impl Into<String>) -> Self {
        self.viacep_url = url.into();
        self
    }

    pub fn with_brasilapi_url(mut self, url: impl Into<String>) -> Self {
        self.brasilapi_url = url.into();
        self
    }

    pub fn with_weather_url(mut self, url: impl Into<String>) -> Self {
        self.weather_url = url.into();
        self
    }

    pub fn with_weather_api_key(mut self, key: impl Into<String>) -> Self {
        self.weather_api_key = Some(key.into());
        self
    }

    pub fn with_race_deadline(mut self, deadline: Duration) -> Self {
        self.race_deadline = deadline;
        self
    }

    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    pub fn build(self) -> Result<ProviderSet, ValidationError> {
        if self.race_deadline.is_zero() {
            return Err(ValidationError::ZeroDeadline);
        }
        if self.providers.is_empty() {
            return Err(ValidationError::NoAddressProviders);
        }

        let http_client = self
            .http_client
            .unwrap_or_else(|| Arc::new(ReqwestHttpClient::new()));

        let mut address_sources: Vec<Arc<dyn AddressSource>> =
            Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            address_sources.push(match provider {
                ProviderId::ViaCep => Arc::new(
                    ViaCepAdapter::new(Arc::clone(&http_client))
                        .with_base_url(self.viacep_url.as_str())
                        .with_timeout_ms(self.request_timeout_ms),
                ),
                ProviderId::BrasilApi => Arc::new(
                    BrasilApiAdapter::new(Arc::clone(&http_client))
                        .with_base_url(self.brasilapi_url.as_str())
                        .with_timeout_ms(self.request_timeout_ms),
                ),
                ProviderId::WeatherApi => {
                    return Err(ValidationError::NotAnAddressProvider {
                        value: provider.as_str().to_owned(),
                    })
                }
            });
        }

        let weather_key_configured = self.weather_api_key.is_some();
        let weather = Arc::new(
            WeatherApiAdapter::new(http_client, self.weather_api_key.unwrap_or_default())
                .with_base_url(self.weather_url)
                .with_timeout_ms(self.request_timeout_ms),
        );

        Ok(ProviderSet {
            address_sources,
            weather,
            race_deadline: self.race_deadline,
            weather_key_configured,
        })
    }
}

fn parse_millis(name: &'static str, raw: &str) -> Result<u64, ValidationError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidMillis {
            name,
            value: raw.to_owned(),
        })
}
