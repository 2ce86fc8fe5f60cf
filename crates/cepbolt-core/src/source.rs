use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Upstream provider identifiers, carried by every record a provider produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    ViaCep,
    BrasilApi,
    WeatherApi,
}

impl ProviderId {
    pub const ALL: [Self; 3] = [Self::ViaCep, Self::BrasilApi, Self::WeatherApi];

    /// Providers that resolve a CEP into an address.
    pub const ADDRESS: [Self; 2] = [Self::ViaCep, Self::BrasilApi];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViaCep => "viacep",
            Self::BrasilApi => "brasilapi",
            Self::WeatherApi => "weatherapi",
        }
    }

    pub const fn serves_addresses(self) -> bool {
        matches!(self, Self::ViaCep | Self::BrasilApi)
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "viacep" => Ok(Self::ViaCep),
            "brasilapi" => Ok(Self::BrasilApi),
            "weatherapi" => Ok(Self::WeatherApi),
            other => Err(ValidationError::InvalidProvider {
                value: other.to_owned(),
            }),
        }
    }
}
