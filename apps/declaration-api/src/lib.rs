//! Declaration API server
//!
//! REST endpoints over LegalDocument payloads:
//! - live preview and finalization checks
//! - lifecycle transitions (finalize, file, reopen)
//! - rendering to PDF, SVG, HTML or plain text
//! - template instantiation

pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::{ApiConfig, AppState};

/// Build the router over shared state
pub fn router(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        .route("/api/formats", get(handlers::formats))
        // Assembly
        .route("/api/documents/preview", post(handlers::preview))
        .route("/api/documents/validate", post(handlers::validate))
        // Lifecycle
        .route("/api/documents/finalize", post(handlers::finalize))
        .route("/api/documents/file", post(handlers::mark_filed))
        .route("/api/documents/reopen", post(handlers::reopen))
        // Rendering
        .route("/api/documents/render", post(handlers::render_artifact))
        .route("/api/documents/render/:format", post(handlers::render_raw))
        // Templates
        .route("/api/templates/instantiate", post(handlers::instantiate_template))
        // Add middleware
        .layer(DefaultBodyLimit::max(state.config.max_payload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
