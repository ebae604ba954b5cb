use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Json, Response},
};

use crate::error::ApiError;
use crate::models::AppConfig;
use crate::server::AppState;
use crate::services::RenderOverrides;

/// Render the canvas: source image on the left, dithered copy beside it.
///
/// `steps` and `grayscale` query parameters replace the configured values
/// for this request only.
pub async fn handle_canvas(
    State(state): State<AppState>,
    query: Result<Query<RenderOverrides>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(overrides) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    tracing::debug!(?overrides, "Canvas requested");

    let png_bytes = state.pipeline.render_png(&overrides).await?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes).into_response())
}

/// Effective configuration as JSON
pub async fn handle_config(State(state): State<AppState>) -> Json<AppConfig> {
    Json(state.pipeline.config().clone())
}

pub async fn handle_not_found() -> ApiError {
    ApiError::NotFound
}
