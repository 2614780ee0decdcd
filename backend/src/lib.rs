pub mod filters;
pub mod handlers;
pub mod models;
pub mod services;

use std::sync::Arc;
use std::time::Instant;
use axum::{
    Router,
    middleware,
    extract::{DefaultBodyLimit, Request},
    http::{HeaderName, HeaderValue, Method},
    response::Response,
    body::Body,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use models::config::AppConfig;
use services::render::RenderService;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

tokio::task_local! {
    static REQUEST_ID: String;
}

/// Id of the request being served on this task, if any.
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

pub struct AppState {
    pub config: Arc<AppConfig>,
    pub render: RenderService,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let config = Arc::new(config);
        Self {
            render: RenderService::new(config.jpeg_quality),
            config,
            started_at: Instant::now(),
        }
    }
}

async fn request_id_middleware(
    request: Request<Body>,
    next: middleware::Next,
) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let mut response = REQUEST_ID
        .scope(request_id.clone(), next.run(request))
        .await;
    if !response.headers().contains_key(REQUEST_ID_HEADER) {
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
    }
    response
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let config = state.config.clone();

    let cors_origins: Vec<HeaderValue> = config.allowed_origins.iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(cors_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .expose_headers([
            axum::http::header::CONTENT_DISPOSITION,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ]);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_response(|response: &Response, latency: std::time::Duration, _span: &Span| {
            tracing::info!(
                status = response.status().as_u16(),
                latency_ms = latency.as_millis() as u64,
                "response",
            );
        });

    Router::new()
        .route("/process", post(handlers::process::process_photo))
        .route("/api/health", get(handlers::health::health_check))
        .route("/api/version", get(handlers::health::version))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes as usize))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
