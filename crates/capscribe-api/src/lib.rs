//! Axum HTTP API server.
//!
//! This crate provides:
//! - The transcript JSON endpoint and TXT/PDF/DOCX download endpoints
//! - The cookie health-check endpoint
//! - CORS, request-id, and request-logging middleware
//! - Document rendering for the download formats

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use routes::create_router;
pub use state::AppState;
