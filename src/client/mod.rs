//! Home Assistant REST client
//!
//! The [`HomeAssistantClient`] trait is the only seam between tool handlers
//! and the network. Handlers issue one call per remote step and never hold
//! state between calls.

pub mod http_client;

pub use http_client::HaHttpClient;

use crate::error::{HaError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

/// HTTP methods used against the automation endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Outcome of a successful remote call
#[derive(Debug, Clone, PartialEq)]
pub enum CallResult {
    /// Response declared a JSON content type and was parsed
    Json(Value),
    /// Response had no JSON body (e.g. 204 No Content)
    Status { code: u16 },
}

impl CallResult {
    /// Render as a JSON tree; status markers become `{status, code}`
    pub fn into_value(self) -> Value {
        match self {
            CallResult::Json(value) => value,
            CallResult::Status { code } => json!({
                "status": "success",
                "code": code,
            }),
        }
    }

    /// Require a JSON body
    pub fn into_json(self) -> Result<Value> {
        match self {
            CallResult::Json(value) => Ok(value),
            CallResult::Status { code } => Err(HaError::invalid_response(format!(
                "expected a JSON body, got HTTP {code} without one"
            ))),
        }
    }
}

/// A single authenticated request against the Home Assistant REST API
///
/// Implementations must be safe to call concurrently. There is no locking
/// across calls: a read followed by a write of the same automation (as the
/// enable/disable tools do) can lose an update made by another writer in
/// between. The API offers no conditional write to guard against this.
#[async_trait]
pub trait HomeAssistantClient: Send + Sync {
    /// Issue `method` against `/api{path}` with an optional JSON body
    async fn call(&self, method: HttpMethod, path: &str, body: Option<&Value>)
        -> Result<CallResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_marker_shape() {
        let value = CallResult::Status { code: 204 }.into_value();
        assert_eq!(value, json!({"status": "success", "code": 204}));
    }

    #[test]
    fn test_into_json_rejects_status_marker() {
        let err = CallResult::Status { code: 204 }.into_json().unwrap_err();
        assert!(matches!(err, HaError::InvalidResponse(_)));
        assert!(err.to_string().contains("204"));
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(HttpMethod::Put), reqwest::Method::PUT);
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
