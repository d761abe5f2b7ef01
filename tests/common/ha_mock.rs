//! WireMock-based Home Assistant REST API mocking
//!
//! Simulates the `/api/automation` endpoints so tools can be exercised
//! without a running Home Assistant instance.

use serde_json::Value;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

pub const TEST_TOKEN: &str = "test-long-lived-token";

/// Mock Home Assistant instance
pub struct MockHomeAssistant {
    pub server: MockServer,
    pub base_url: String,
}

impl MockHomeAssistant {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Dispatcher talking to this mock with the test token
    pub fn dispatcher(&self) -> ha_automation_mcp::ToolDispatcher {
        super::dispatcher_for(&self.base_url, TEST_TOKEN)
    }

    /// MCP backend talking to this mock with the test token
    pub fn backend(&self) -> ha_automation_mcp::AutomationBackend {
        ha_automation_mcp::AutomationBackend::new(self.dispatcher())
    }

    /// Answer `verb api_path` with a JSON body (authenticated requests only)
    pub async fn mock_json(&self, verb: &str, api_path: &str, body: Value) {
        Mock::given(method(verb))
            .and(path(api_path))
            .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `verb api_path` with a bare status and no body
    pub async fn mock_status(&self, verb: &str, api_path: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(api_path))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Fail every request with `status` and a text body
    pub async fn mock_failure(&self, status: u16, body: &str) {
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Method and path of every request received so far, in order
    pub async fn request_log(&self) -> Vec<(String, String)> {
        self.requests()
            .await
            .iter()
            .map(|r| (r.method.to_string(), r.url.path().to_string()))
            .collect()
    }
}
