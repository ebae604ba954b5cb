//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::get,
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::error::PipelineError;
use crate::models::AppConfig;
use crate::services::DitherPipeline;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<DitherPipeline>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(
    config: AppConfig,
    base_dir: impl Into<PathBuf>,
) -> Result<AppState, PipelineError> {
    let pipeline = Arc::new(DitherPipeline::new(Arc::new(config), base_dir)?);
    Ok(AppState { pipeline })
}

/// Build the router with all endpoints and middleware.
///
/// Every request renders the canvas from scratch, so responses are marked
/// as not cacheable.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/canvas", get(api::handle_canvas))
        .route("/api/config", get(api::handle_config))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .fallback(api::handle_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}
