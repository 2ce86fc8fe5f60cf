use serde::Serialize;

use cepbolt_core::{ProviderId, ProviderSet};

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct SourcesResponseData {
    sources: Vec<SourceEntry>,
    race_deadline_ms: u64,
    weather_key_configured: bool,
}

#[derive(Debug, Serialize)]
struct SourceEntry {
    id: ProviderId,
    role: &'static str,
    enabled: bool,
    /// Position in the race set; 0 also serves the weather pipeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    preference: Option<usize>,
}

pub fn run(providers: &ProviderSet) -> Result<CommandResult, CliError> {
    let enabled = providers.address_providers();

    let sources = ProviderId::ALL
        .into_iter()
        .map(|id| {
            if id.serves_addresses() {
                let preference = enabled.iter().position(|candidate| *candidate == id);
                SourceEntry {
                    id,
                    role: "address",
                    enabled: preference.is_some(),
                    preference,
                }
            } else {
                SourceEntry {
                    id,
                    role: "weather",
                    enabled: true,
                    preference: None,
                }
            }
        })
        .collect();

    let data = serde_json::to_value(SourcesResponseData {
        sources,
        race_deadline_ms: providers.race_deadline().as_millis().min(u128::from(u64::MAX)) as u64,
        weather_key_configured: providers.weather_key_configured(),
    })?;
    Ok(CommandResult::ok(data))
}
