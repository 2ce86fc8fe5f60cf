use serde::{Deserialize, Serialize};

use crate::ProviderId;

/// Canonical address record.
///
/// Every field of one `Address` comes from the single provider named in
/// `source`; records from different providers are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Postal code as eight digits, whatever formatting the provider used.
    pub cep: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub source: ProviderId,
}

/// Temperature reading in the three units the service reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    #[serde(rename = "temp_C")]
    pub celsius: f64,
    #[serde(rename = "temp_F")]
    pub fahrenheit: f64,
    #[serde(rename = "temp_K")]
    pub kelvin: f64,
}

impl Temperature {
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            celsius,
            fahrenheit: celsius * 1.8 + 32.0,
            kelvin: celsius + 273.0,
        }
    }
}

/// Result of a CEP → city → temperature lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub address: Address,
    pub temperature: Temperature,
}
