use cepbolt_core::ProviderSet;
use cepbolt_web::AppState;
use tracing::{info, warn};

use crate::cli::ServeArgs;
use crate::error::CliError;

pub async fn run(args: &ServeArgs, providers: &ProviderSet) -> Result<(), CliError> {
    if !providers.weather_key_configured() {
        warn!("no weather api key configured; /cep lookups will fail upstream");
    }

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!(
        bind = %listener.local_addr()?,
        providers = ?providers.address_providers(),
        race_deadline_ms = providers.race_deadline().as_millis() as u64,
        "cepbolt listening"
    );

    cepbolt_web::serve(listener, AppState::from(providers), shutdown_signal()).await?;
    info!("cepbolt stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
