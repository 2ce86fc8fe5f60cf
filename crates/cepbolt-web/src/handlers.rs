use axum::extract::{Path, State};
use axum::Json;
use cepbolt_core::{Address, Cep, RaceOutcome, Temperature};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::AppState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

/// GET /health
pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /cep/:cep
pub(crate) async fn weather_by_cep(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Temperature>, ApiError> {
    match state.pipeline.resolve(&raw).await {
        Ok(report) => {
            info!(
                cep = %raw,
                city = %report.address.city,
                provider = %report.address.source,
                temp_c = report.temperature.celsius,
                "weather lookup succeeded"
            );
            Ok(Json(report.temperature))
        }
        Err(error) => {
            let api_error = ApiError::from(&error);
            warn!(cep = %raw, error.code = error.code(), %error, "weather lookup failed");
            Err(api_error)
        }
    }
}

/// GET /address/:cep
pub(crate) async fn address_by_cep(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Address>, ApiError> {
    let cep = Cep::parse(&raw).map_err(|error| {
        warn!(cep = %raw, %error, "rejected malformed cep");
        ApiError::InvalidZipcode
    })?;

    let outcome = state.race.race(&cep).await;
    for failure in failure_log(&outcome) {
        warn!(
            cep = %cep,
            provider = %failure.provider,
            error.code = failure.error.code(),
            error = %failure.error,
            "address provider failed"
        );
    }

    let not_found = outcome.is_not_found();
    match outcome {
        RaceOutcome::Success(win) => {
            info!(
                cep = %cep,
                provider = %win.address.source,
                latency_ms = win.latency_ms,
                "address race won"
            );
            Ok(Json(win.address))
        }
        RaceOutcome::Timeout { deadline } => {
            warn!(cep = %cep, deadline_ms = deadline.as_millis() as u64, "address race timed out");
            Err(ApiError::AddressTimeout)
        }
        RaceOutcome::Failure(_) if not_found => Err(ApiError::ZipcodeNotFound),
        RaceOutcome::Failure(_) => Err(ApiError::AddressUnavailable),
    }
}

fn failure_log(outcome: &RaceOutcome) -> &[cepbolt_core::ProviderFailure] {
    match outcome {
        RaceOutcome::Success(win) => &win.failures,
        RaceOutcome::Failure(failures) => failures,
        RaceOutcome::Timeout { .. } => &[],
    }
}
