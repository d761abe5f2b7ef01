//! Uniform response envelope
//!
//! Every tool invocation ends in exactly one envelope: the success payload,
//! or `{error, errorKind}` for a failure.

use crate::error::HaError;
use pulseengine_mcp_protocol::{CallToolResult, Content};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    payload: Value,
    is_error: bool,
}

impl ResponseEnvelope {
    pub fn success(payload: Value) -> Self {
        Self {
            payload,
            is_error: false,
        }
    }

    pub fn failure(error: &HaError) -> Self {
        Self {
            payload: json!({
                "error": error.to_string(),
                "errorKind": error.kind().as_str(),
            }),
            is_error: true,
        }
    }

    pub fn from_result(result: crate::Result<Value>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(e) => Self::failure(&e),
        }
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Pretty-printed JSON text carried to the client
    pub fn text(&self) -> String {
        serde_json::to_string_pretty(&self.payload).unwrap_or_else(|_| self.payload.to_string())
    }

    /// One text content item; failures set `isError`
    pub fn into_call_tool_result(self) -> CallToolResult {
        let text = self.text();
        if self.is_error {
            CallToolResult::error_text(text)
        } else {
            CallToolResult::success(vec![Content::text(text)])
        }
    }
}

impl From<ResponseEnvelope> for CallToolResult {
    fn from(envelope: ResponseEnvelope) -> Self {
        envelope.into_call_tool_result()
    }
}
