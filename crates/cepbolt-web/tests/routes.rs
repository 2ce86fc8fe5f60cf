//! Behavior tests for the HTTP routes, driven through `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use cepbolt_core::{HttpClient, HttpError, HttpRequest, HttpResponse, ProviderSetBuilder};
use cepbolt_web::{router, AppState};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const VIACEP_URL: &str = "http://viacep.test/ws";
const BRASILAPI_URL: &str = "http://brasilapi.test/api/cep/v1";
const WEATHER_URL: &str = "http://weather.test/v1/current.json";

const VIACEP_SE: &str = r#"{"cep":"01001-000","logradouro":"Praça da Sé","bairro":"Sé","localidade":"São Paulo","uf":"SP"}"#;
const BRASILAPI_SE: &str = r#"{"cep":"01001000","state":"SP","city":"São Paulo","neighborhood":"Sé","street":"Praça da Sé"}"#;
const WEATHER_25C: &str = r#"{"current":{"temp_c":25.0}}"#;

type Reply = Result<HttpResponse, HttpError>;

struct ScriptedTransport {
    routes: Vec<(&'static str, u64, Reply)>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    fn new(routes: Vec<(&'static str, u64, Reply)>) -> Arc<Self> {
        Arc::new(Self {
            routes,
            calls: AtomicUsize::new(0),
        })
    }
}

impl HttpClient for ScriptedTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (delay, reply) = self
            .routes
            .iter()
            .find(|(prefix, _, _)| request.url.starts_with(prefix))
            .map(|(_, delay, reply)| (Duration::from_millis(*delay), reply.clone()))
            .unwrap_or((Duration::ZERO, Ok(HttpResponse::new(599, "unrouted"))));
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            reply
        })
    }
}

fn app(transport: &Arc<ScriptedTransport>) -> Router {
    let providers = ProviderSetBuilder::new()
        .with_http_client(transport.clone())
        .with_viacep_url(VIACEP_URL)
        .with_brasilapi_url(BRASILAPI_URL)
        .with_weather_url(WEATHER_URL)
        .with_weather_api_key("test-key")
        .build()
        .expect("valid provider set");
    router(AppState::from(&providers))
}

async fn get(app: Router, path: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, body)
}

// =============================================================================
// GET /cep/:cep
// =============================================================================

#[tokio::test]
async fn weather_route_returns_three_scales() {
    // Given: ViaCEP and WeatherAPI both answer
    let transport = ScriptedTransport::new(vec![
        (VIACEP_URL, 0, Ok(HttpResponse::ok_json(VIACEP_SE))),
        (WEATHER_URL, 0, Ok(HttpResponse::ok_json(WEATHER_25C))),
    ]);

    // When: A client asks for the weather at a CEP
    let (status, body) = get(app(&transport), "/cep/01001000").await;

    // Then: The temperature is returned in Celsius, Fahrenheit and Kelvin
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["temp_C"], 25.0);
    assert_eq!(body["temp_F"], 77.0);
    assert_eq!(body["temp_K"], 298.0);
}

#[tokio::test]
async fn weather_route_rejects_malformed_cep_with_422() {
    let transport = ScriptedTransport::new(Vec::new());

    let (status, body) = get(app(&transport), "/cep/abcd1234").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid zipcode");
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn weather_route_reports_unknown_cep_with_404() {
    let transport = ScriptedTransport::new(vec![(
        VIACEP_URL,
        0,
        Ok(HttpResponse::ok_json(r#"{"erro": true}"#)),
    )]);

    let (status, body) = get(app(&transport), "/cep/99999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "can not find zipcode");
}

#[tokio::test]
async fn weather_route_reports_weather_outage_with_500() {
    let transport = ScriptedTransport::new(vec![
        (VIACEP_URL, 0, Ok(HttpResponse::ok_json(VIACEP_SE))),
        (WEATHER_URL, 0, Err(HttpError::new("connection refused"))),
    ]);

    let (status, body) = get(app(&transport), "/cep/01001000").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "failed to fetch temperature");
}

// =============================================================================
// GET /address/:cep
// =============================================================================

#[tokio::test(start_paused = true)]
async fn address_route_returns_fastest_provider() {
    // Given: BrasilAPI answers well before ViaCEP
    let transport = ScriptedTransport::new(vec![
        (VIACEP_URL, 400, Ok(HttpResponse::ok_json(VIACEP_SE))),
        (BRASILAPI_URL, 20, Ok(HttpResponse::ok_json(BRASILAPI_SE))),
    ]);

    // When: A client asks for the address
    let (status, body) = get(app(&transport), "/address/01001000").await;

    // Then: The BrasilAPI record is returned
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "São Paulo");
    assert_eq!(body["state"], "SP");
    assert_eq!(body["source"], "brasilapi");
}

#[tokio::test(start_paused = true)]
async fn address_route_maps_unanimous_not_found_to_404() {
    let transport = ScriptedTransport::new(vec![
        (VIACEP_URL, 10, Ok(HttpResponse::ok_json(r#"{"erro": true}"#))),
        (BRASILAPI_URL, 10, Ok(HttpResponse::new(404, "{}"))),
    ]);

    let (status, body) = get(app(&transport), "/address/99999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "can not find zipcode");
}

#[tokio::test(start_paused = true)]
async fn address_route_prefers_late_success_over_early_not_found() {
    // Given: ViaCEP reports an unknown CEP before BrasilAPI finds it
    let transport = ScriptedTransport::new(vec![
        (VIACEP_URL, 10, Ok(HttpResponse::ok_json(r#"{"erro": true}"#))),
        (BRASILAPI_URL, 50, Ok(HttpResponse::ok_json(BRASILAPI_SE))),
    ]);

    // When: A client asks for the address
    let (status, body) = get(app(&transport), "/address/01001000").await;

    // Then: The late success is served, not a 404
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "brasilapi");
}

#[tokio::test(start_paused = true)]
async fn address_route_maps_outage_to_500() {
    let transport = ScriptedTransport::new(vec![
        (VIACEP_URL, 10, Ok(HttpResponse::new(502, "bad gateway"))),
        (BRASILAPI_URL, 10, Ok(HttpResponse::new(404, "{}"))),
    ]);

    let (status, body) = get(app(&transport), "/address/01001000").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "failed to fetch address");
}

#[tokio::test(start_paused = true)]
async fn address_route_maps_deadline_to_504() {
    let transport = ScriptedTransport::new(vec![
        (VIACEP_URL, 2_000, Ok(HttpResponse::ok_json(VIACEP_SE))),
        (BRASILAPI_URL, 2_000, Ok(HttpResponse::ok_json(BRASILAPI_SE))),
    ]);

    let (status, body) = get(app(&transport), "/address/01001000").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "address lookup timed out");
}

#[tokio::test]
async fn address_route_rejects_malformed_cep_before_racing() {
    let transport = ScriptedTransport::new(Vec::new());

    let (status, body) = get(app(&transport), "/address/123").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid zipcode");
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// GET /health
// =============================================================================

#[tokio::test]
async fn health_route_reports_ok() {
    let transport = ScriptedTransport::new(Vec::new());

    let (status, body) = get(app(&transport), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
