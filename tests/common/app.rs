//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

use dithercanvas::models::AppConfig;
use dithercanvas::server::{build_router, create_app_state};

/// Test application with router and a scratch directory for image files
pub struct TestApp {
    router: axum::Router,
    pub dir: TempDir,
}

impl TestApp {
    /// Create a test app whose relative image paths resolve into a fresh
    /// temporary directory
    pub fn new(config: AppConfig) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let state = create_app_state(config, dir.path()).expect("Failed to create app state");
        let router = build_router(state);
        Self { router, dir }
    }

    /// Create a test app serving `png` as its source image
    pub fn with_image(png: &[u8], config: AppConfig) -> Self {
        let app = Self::new(AppConfig {
            image_url: "source.png".to_string(),
            ..config
        });
        app.write_file("source.png", png);
        app
    }

    /// Write a file into the app's scratch directory
    pub fn write_file(&self, name: &str, contents: &[u8]) {
        std::fs::write(self.dir.path().join(name), contents).expect("Failed to write file");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
