//! HTTP client implementation for Home Assistant communication
//!
//! One request per call, bearer-token authentication, no retries.

use crate::client::{CallResult, HomeAssistantClient, HttpMethod};
use crate::config::HaConfig;
use crate::error::{HaError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Response};
use serde_json::Value;
use tracing::debug;

/// HTTP client for the Home Assistant REST API
#[derive(Debug, Clone)]
pub struct HaHttpClient {
    /// HTTP client instance (cheap to clone, shares its connection pool)
    client: Client,

    /// Immutable connection settings
    config: HaConfig,
}

impl HaHttpClient {
    /// Create a new HTTP client
    pub fn new(config: HaConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new()
            .user_agent(format!("ha-automation-mcp/{}", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| HaError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Connection settings this client was built with
    pub fn config(&self) -> &HaConfig {
        &self.config
    }

    /// Whether the response declares `application/json` (parameters ignored)
    fn is_json(response: &Response) -> bool {
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value: &HeaderValue| value.to_str().ok())
            .and_then(|ct| ct.split(';').next())
            .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
            .unwrap_or(false)
    }

    /// Normalize a response into a [`CallResult`] or a remote call error
    async fn read_response(response: Response) -> Result<CallResult> {
        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(HaError::remote_call(status.as_u16(), body));
        }

        if !Self::is_json(&response) {
            return Ok(CallResult::Status {
                code: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| HaError::invalid_response(format!("malformed JSON body: {e}")))?;
        Ok(CallResult::Json(value))
    }
}

#[async_trait]
impl HomeAssistantClient for HaHttpClient {
    async fn call(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<CallResult> {
        if self.config.token.is_empty() {
            return Err(HaError::config("Home Assistant token is empty"));
        }

        let url = self.config.endpoint_url(path)?;
        debug!("{method} {url}");

        let mut request = self
            .client
            .request(method.into(), url)
            .bearer_auth(&self.config.token);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        debug!("{method} {path} -> {}", response.status());

        Self::read_response(response).await
    }
}
