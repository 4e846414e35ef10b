//! API routes.

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::cookies::cookies_status;
use crate::handlers::downloads::{download_docx, download_pdf, download_txt};
use crate::handlers::health::health;
use crate::handlers::transcript::get_transcript;
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let transcript_routes = Router::new()
        .route("/transcript/:video_id", get(get_transcript))
        .route("/transcript/:video_id/download/txt", get(download_txt))
        .route("/transcript/:video_id/download/pdf", get(download_pdf))
        .route("/transcript/:video_id/download/docx", get(download_docx));

    let cookie_routes = Router::new().route("/cookies/status", get(cookies_status));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health));

    Router::new()
        .merge(transcript_routes)
        .merge(cookie_routes)
        .merge(health_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
