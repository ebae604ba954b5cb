//! Mock HTTP server for testing remote image loading.

use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockHttpServer {
    pub server: MockServer,
}

impl MockHttpServer {
    /// Start a new mock HTTP server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get URL for a specific path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    /// Mock a GET endpoint returning PNG bytes, expected to be hit `times` times
    pub async fn mock_png(&self, endpoint: &str, png: Vec<u8>, times: u64) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(png)
                    .insert_header("content-type", "image/png"),
            )
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Mock an endpoint that returns an error
    pub async fn mock_error(&self, endpoint: &str, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
    }
}
