// Web server: Axum-based JSON API in front of the similarity engine.
//
// Routes:
//   POST /api/similarity            multipart upload, returns matrix + session id
//   POST /api/download/{filetype}   excel | pdf export of a session's report
//   POST /api/reset                 forget a session
//   GET  /health                    liveness probe
//
// There is no global "last upload": every download and reset names its
// session with ?session=<id>.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::similarity::SimilarityEngine;

pub mod handlers;
pub mod session;

use session::SessionStore;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: SimilarityEngine,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let engine = SimilarityEngine::new(config.matcher_options());
        Self {
            config: Arc::new(config),
            engine,
            sessions: SessionStore::new(),
        }
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, port: u16, bind: &str) -> Result<()> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let state = AppState::new(config);
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("dupdetect API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health))
        .route("/api/similarity", post(handlers::similarity::upload_and_compare))
        .route(
            "/api/download/{filetype}",
            post(handlers::download::download_report),
        )
        .route("/api/reset", post(handlers::reset::reset_session))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE])
                .expose_headers([header::CONTENT_DISPOSITION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness check, always 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
