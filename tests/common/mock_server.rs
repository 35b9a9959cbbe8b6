//! Mock HTTP server standing in for board pages and the image CDN.

use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use std::time::Duration;

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

    /// Get the base URL of the mock server
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Get URL for a specific path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    /// Mock a GET endpoint returning HTML
    pub async fn mock_get_html(&self, endpoint: &str, html: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
            .mount(&self.server)
            .await;
    }

    /// Mock a GET endpoint returning PNG bytes
    pub async fn mock_get_png(&self, endpoint: &str, bytes: Vec<u8>) {
        self.mock_get_bytes(endpoint, bytes, "image/png").await;
    }

    /// Mock a GET endpoint returning raw bytes with the given content type
    pub async fn mock_get_bytes(&self, endpoint: &str, bytes: Vec<u8>, content_type: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_raw(bytes, content_type))
            .mount(&self.server)
            .await;
    }

    /// Mock a GET endpoint that answers after `delay`
    pub async fn mock_slow_png(&self, endpoint: &str, bytes: Vec<u8>, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(bytes, "image/png")
                    .set_delay(delay),
            )
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

    /// Mock an endpoint that fails `times` times with `status` before the
    /// mocks mounted after it take over
    pub async fn mock_error_times(&self, endpoint: &str, status: u16, times: u64) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status))
            .up_to_n_times(times)
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server has seen for `endpoint`
    pub async fn hits(&self, endpoint: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == endpoint)
            .count()
    }
}
