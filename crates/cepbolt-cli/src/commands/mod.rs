mod address;
mod serve;
mod sources;
mod weather;

use std::time::Duration;

use cepbolt_core::{ProviderSet, ProviderSetBuilder};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Rendered payload plus whether the command counts as failed.
pub struct CommandResult {
    pub data: Value,
    pub failed: bool,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            failed: false,
        }
    }

    pub fn failed(data: Value) -> Self {
        Self { data, failed: true }
    }
}

/// Runs the selected command. `serve` blocks until shutdown and returns `None`.
pub async fn run(cli: &Cli) -> Result<Option<CommandResult>, CliError> {
    let providers = provider_set(cli)?;

    let result = match &cli.command {
        Command::Serve(args) => {
            serve::run(args, &providers).await?;
            return Ok(None);
        }
        Command::Address(args) => address::run(args, &providers).await?,
        Command::Weather(args) => weather::run(args, &providers).await?,
        Command::Sources => sources::run(&providers)?,
    };

    Ok(Some(result))
}

/// Environment first, then command-line flags on top.
fn provider_set(cli: &Cli) -> Result<ProviderSet, CliError> {
    let mut builder = ProviderSetBuilder::new().with_env()?;
    if let Some(deadline_ms) = cli.deadline_ms {
        builder = builder.with_race_deadline(Duration::from_millis(deadline_ms));
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        builder = builder.with_request_timeout_ms(timeout_ms);
    }
    if !cli.providers.is_empty() {
        builder = builder.with_providers(cli.providers.iter().copied());
    }
    Ok(builder.build()?)
}
