//! HTTP surface for cepbolt.
//!
//! Endpoints:
//! - `GET /cep/:cep` - current temperature for the city behind a CEP
//! - `GET /address/:cep` - address from whichever provider answers first
//! - `GET /health` - liveness check
//!
//! Errors are `{"error": "<message>"}` with a fixed message per status.

mod error;
mod handlers;

use axum::routing::get;
use axum::Router;
use cepbolt_core::{AddressRace, LookupPipeline, ProviderSet};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub race: AddressRace,
    pub pipeline: LookupPipeline,
}

impl AppState {
    pub fn new(race: AddressRace, pipeline: LookupPipeline) -> Self {
        Self { race, pipeline }
    }
}

impl From<&ProviderSet> for AppState {
    fn from(providers: &ProviderSet) -> Self {
        Self::new(providers.race(), providers.pipeline())
    }
}

/// Create the HTTP router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/cep/:cep", get(handlers::weather_by_cep))
        .route("/address/:cep", get(handlers::address_by_cep))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve `router(state)` on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown: F,
) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
