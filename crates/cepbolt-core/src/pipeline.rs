//! Sequential CEP → city → temperature lookup.

use std::sync::Arc;

use crate::data_source::{AddressSource, WeatherSource};
use crate::{Cep, LookupError, ProviderId, WeatherReport};

/// Two ordered stages, no concurrency: one address source resolves the city,
/// then one weather source reports its temperature.
#[derive(Clone)]
pub struct LookupPipeline {
    address: Arc<dyn AddressSource>,
    weather: Arc<dyn WeatherSource>,
}

impl LookupPipeline {
    pub fn new(address: Arc<dyn AddressSource>, weather: Arc<dyn WeatherSource>) -> Self {
        Self { address, weather }
    }

    pub fn address_provider(&self) -> ProviderId {
        self.address.id()
    }

    pub fn weather_provider(&self) -> ProviderId {
        self.weather.id()
    }

    /// Validates `raw` before any network call, then runs both stages.
    ///
    /// # Errors
    ///
    /// - [`LookupError::Validation`] if `raw` is not eight ASCII digits
    /// - [`LookupError::NotFound`] if the address source does not know the CEP
    /// - [`LookupError::Upstream`] for any other address failure and for every
    ///   weather failure
    pub async fn resolve(&self, raw: &str) -> Result<WeatherReport, LookupError> {
        let cep = Cep::parse(raw)?;
        self.resolve_cep(&cep).await
    }

    pub async fn resolve_cep(&self, cep: &Cep) -> Result<WeatherReport, LookupError> {
        let address = self.address.lookup(cep).await.map_err(|error| {
            if error.is_not_found() {
                LookupError::NotFound(error)
            } else {
                LookupError::Upstream(error)
            }
        })?;

        let temperature = self
            .weather
            .current(&address.city)
            .await
            .map_err(LookupError::Upstream)?;

        Ok(WeatherReport {
            address,
            temperature,
        })
    }
}
