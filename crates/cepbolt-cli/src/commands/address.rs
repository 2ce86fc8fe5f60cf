use serde::Serialize;

use cepbolt_core::{Address, Cep, ProviderFailure, ProviderId, ProviderSet, RaceOutcome};

use crate::cli::CepArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum AddressResponseData {
    Success {
        address: Address,
        latency_ms: u64,
        failures: Vec<FailureData>,
    },
    Failure {
        not_found: bool,
        failures: Vec<FailureData>,
    },
    Timeout {
        deadline_ms: u64,
    },
}

#[derive(Debug, Serialize)]
struct FailureData {
    provider: ProviderId,
    code: &'static str,
    message: String,
}

impl From<ProviderFailure> for FailureData {
    fn from(failure: ProviderFailure) -> Self {
        Self {
            provider: failure.provider,
            code: failure.error.code(),
            message: failure.error.message().to_owned(),
        }
    }
}

pub async fn run(args: &CepArgs, providers: &ProviderSet) -> Result<CommandResult, CliError> {
    let cep = Cep::parse(&args.cep)?;
    let outcome = providers.race().race(&cep).await;
    let not_found = outcome.is_not_found();

    let (data, failed) = match outcome {
        RaceOutcome::Success(win) => (
            AddressResponseData::Success {
                address: win.address,
                latency_ms: win.latency_ms,
                failures: win.failures.into_iter().map(FailureData::from).collect(),
            },
            false,
        ),
        RaceOutcome::Failure(failures) => (
            AddressResponseData::Failure {
                not_found,
                failures: failures.into_iter().map(FailureData::from).collect(),
            },
            true,
        ),
        RaceOutcome::Timeout { deadline } => (
            AddressResponseData::Timeout {
                deadline_ms: deadline.as_millis().min(u128::from(u64::MAX)) as u64,
            },
            true,
        ),
    };

    let data = serde_json::to_value(data)?;
    Ok(if failed {
        CommandResult::failed(data)
    } else {
        CommandResult::ok(data)
    })
}
