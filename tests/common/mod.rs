//! Common test utilities

#![allow(dead_code)]

pub mod ha_mock;

use ha_automation_mcp::{HaConfig, HaHttpClient, ToolDispatcher};
use serde_json::{Map, Value};
use std::sync::Arc;

pub use ha_mock::{MockHomeAssistant, TEST_TOKEN};

/// Dispatcher wired to a real HTTP client pointing at `base_url`
pub fn dispatcher_for(base_url: &str, token: &str) -> ToolDispatcher {
    let config = HaConfig::new(base_url, token).expect("valid test URL");
    let client = HaHttpClient::new(config).expect("client builds");
    ToolDispatcher::new(Arc::new(client))
}

/// Tool arguments from a `json!({...})` literal
pub fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("tool arguments must be an object, got {other}"),
    }
}
