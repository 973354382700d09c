// Dreambook backend server
//
// Hosts the dream-chat HTTP surface: POST /api/dream-chat and
// GET /health, plus a JSON 404 fallback. The router is built from an
// injected AppState so tests can substitute the interpreter.

pub mod routes;

use std::sync::Arc;

use axum::http::{HeaderValue, Method, Request};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use dreambook_lib::config::AppConfig;
use dreambook_lib::services::ai::DreamInterpreter;

/// Shared state injected into request handlers
#[derive(Clone)]
pub struct AppState {
    pub interpreter: Arc<dyn DreamInterpreter>,
}

impl AppState {
    pub fn new(interpreter: Arc<dyn DreamInterpreter>) -> Self {
        Self { interpreter }
    }
}

/// Build the application router.
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    let cors = cors_layer(&config.allowed_origins);

    Router::new()
        .route("/api/dream-chat", post(routes::chat::dream_chat))
        .route("/health", get(routes::health::health))
        .fallback(routes::not_found)
        .layer(cors)
        .layer(axum::middleware::from_fn(log_request))
        .with_state(state)
}

/// CORS layer from the configured origin list; an empty list allows
/// any origin (the kiosk web build is served from file://, which
/// sends no meaningful Origin header).
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// One log line per request, before routing.
async fn log_request(
    request: Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> axum::response::Response {
    log::info!("[http] {} {}", request.method(), request.uri().path());
    next.run(request).await
}
