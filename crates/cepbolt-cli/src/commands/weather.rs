use serde::Serialize;

use cepbolt_core::{ProviderId, ProviderSet, Temperature};

use crate::cli::CepArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct WeatherResponseData {
    cep: String,
    city: String,
    state: String,
    address_source: ProviderId,
    #[serde(flatten)]
    temperature: Temperature,
}

pub async fn run(args: &CepArgs, providers: &ProviderSet) -> Result<CommandResult, CliError> {
    if !providers.weather_key_configured() {
        tracing::warn!("no weather api key configured; the provider will likely reject the request");
    }

    let report = providers.pipeline().resolve(&args.cep).await?;

    let data = serde_json::to_value(WeatherResponseData {
        cep: report.address.cep,
        city: report.address.city,
        state: report.address.state,
        address_source: report.address.source,
        temperature: report.temperature,
    })?;
    Ok(CommandResult::ok(data))
}
