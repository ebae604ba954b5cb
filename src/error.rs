use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain the source image. Raised once per load, never retried.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP status {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("Image has no pixels: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Invalid image buffer: {0}")]
    Buffer(#[from] step_dither::BufferError),
}

/// Failure to hand a buffer to the canvas or encode the canvas.
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Invalid output buffer: {0}")]
    Buffer(#[from] step_dither::BufferError),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Dither error: {0}")]
    Dither(#[from] step_dither::DitherError),

    #[error("Present error: {0}")]
    Present(#[from] PresentError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Dither task failed: {0}")]
    Task(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::Pipeline(PipelineError::Dither(
                e @ step_dither::DitherError::InvalidConfig(_),
            )) => (StatusCode::BAD_REQUEST, e.to_string()),
            // The image source is upstream of us
            ApiError::Pipeline(PipelineError::Load(e)) => (StatusCode::BAD_GATEWAY, e.to_string()),
            ApiError::Pipeline(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
