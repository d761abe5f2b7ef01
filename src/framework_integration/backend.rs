//! Home Assistant automation backend for the MCP framework
//!
//! Only tools are served. Resource, prompt and subscription requests are
//! answered with "not supported".

use crate::client::{HaHttpClient, HomeAssistantClient};
use crate::config::HaConfig;
use crate::error::HaError;
use crate::server::dispatcher::ToolDispatcher;
use crate::tools::catalog::ToolDescriptor;
use async_trait::async_trait;
use pulseengine_mcp_protocol::*;
use pulseengine_mcp_server::backend::{BackendError, McpBackend};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "home-assistant-automations";

/// Convert HaError to BackendError
impl From<HaError> for BackendError {
    fn from(err: HaError) -> Self {
        match err {
            HaError::Config(msg) | HaError::Argument(msg) => BackendError::configuration(msg),
            HaError::Http(e) => BackendError::connection(e.to_string()),
            HaError::UnknownTool(name) => {
                BackendError::not_supported(format!("Unknown tool: {name}"))
            }
            _ => BackendError::internal(err.to_string()),
        }
    }
}

impl From<&ToolDescriptor> for Tool {
    fn from(descriptor: &ToolDescriptor) -> Self {
        Tool {
            name: descriptor.name().to_string(),
            description: descriptor.description.to_string(),
            input_schema: descriptor.input_schema(),
        }
    }
}

/// MCP backend serving the automation tools
#[derive(Clone)]
pub struct AutomationBackend {
    dispatcher: ToolDispatcher,
}

impl AutomationBackend {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Backend over any client implementation
    pub fn with_client(client: Arc<dyn HomeAssistantClient>) -> Self {
        Self::new(ToolDispatcher::new(client))
    }

    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }
}

/// Tool arguments arrive as an optional JSON value; anything but an object
/// is treated as no arguments and left to required-argument validation.
fn argument_map(arguments: Option<Value>) -> Map<String, Value> {
    match arguments {
        Some(Value::Object(map)) => map,
        Some(other) => {
            warn!("Ignoring non-object tool arguments: {other}");
            Map::new()
        }
        None => Map::new(),
    }
}

#[async_trait]
impl McpBackend for AutomationBackend {
    type Error = BackendError;
    type Config = HaConfig;

    async fn initialize(config: Self::Config) -> std::result::Result<Self, Self::Error> {
        config.validate()?;
        let client = HaHttpClient::new(config)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    fn get_server_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Manage Home Assistant automations: list, inspect, create, update, delete, \
                 trigger, enable and disable them. Automation bodies are YAML mappings."
                    .to_string(),
            ),
        }
    }

    async fn health_check(&self) -> std::result::Result<(), Self::Error> {
        Ok(())
    }

    async fn list_tools(
        &self,
        _params: PaginatedRequestParam,
    ) -> std::result::Result<ListToolsResult, Self::Error> {
        let tools: Vec<Tool> = self.dispatcher.list_tools().iter().map(Tool::from).collect();
        debug!("Listed {} tools", tools.len());

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        params: CallToolRequestParam,
    ) -> std::result::Result<CallToolResult, Self::Error> {
        let envelope = self
            .dispatcher
            .call_tool(&params.name, argument_map(params.arguments))
            .await;

        Ok(envelope.into_call_tool_result())
    }

    async fn list_resources(
        &self,
        _params: PaginatedRequestParam,
    ) -> std::result::Result<ListResourcesResult, Self::Error> {
        Ok(ListResourcesResult {
            resources: vec![],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        params: ReadResourceRequestParam,
    ) -> std::result::Result<ReadResourceResult, Self::Error> {
        Err(BackendError::not_supported(format!(
            "Unknown resource: {}",
            params.uri
        )))
    }

    async fn list_resource_templates(
        &self,
        _params: PaginatedRequestParam,
    ) -> std::result::Result<ListResourceTemplatesResult, Self::Error> {
        Ok(ListResourceTemplatesResult {
            resource_templates: vec![],
            next_cursor: None,
        })
    }

    async fn list_prompts(
        &self,
        _params: PaginatedRequestParam,
    ) -> std::result::Result<ListPromptsResult, Self::Error> {
        Ok(ListPromptsResult {
            prompts: vec![],
            next_cursor: None,
        })
    }

    async fn get_prompt(
        &self,
        params: GetPromptRequestParam,
    ) -> std::result::Result<GetPromptResult, Self::Error> {
        Err(BackendError::not_supported(format!(
            "Unknown prompt: {}",
            params.name
        )))
    }

    async fn subscribe(
        &self,
        params: SubscribeRequestParam,
    ) -> std::result::Result<(), Self::Error> {
        Err(BackendError::not_supported(format!(
            "Subscriptions are not supported: {}",
            params.uri
        )))
    }

    async fn unsubscribe(
        &self,
        params: UnsubscribeRequestParam,
    ) -> std::result::Result<(), Self::Error> {
        Err(BackendError::not_supported(format!(
            "Subscriptions are not supported: {}",
            params.uri
        )))
    }

    async fn complete(
        &self,
        _params: CompleteRequestParam,
    ) -> std::result::Result<CompleteResult, Self::Error> {
        Ok(CompleteResult { completion: vec![] })
    }

    async fn set_level(
        &self,
        params: SetLevelRequestParam,
    ) -> std::result::Result<(), Self::Error> {
        debug!("Log level change requested: {}", params.level);
        Ok(())
    }

    async fn handle_custom_method(
        &self,
        method: &str,
        _params: Value,
    ) -> std::result::Result<Value, Self::Error> {
        warn!("Unknown custom method: {}", method);
        Err(BackendError::not_supported(format!("Unknown method: {method}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{CallResult, HttpMethod};
    use serde_json::json;

    struct StaticClient;

    #[async_trait]
    impl HomeAssistantClient for StaticClient {
        async fn call(
            &self,
            _method: HttpMethod,
            _path: &str,
            _body: Option<&Value>,
        ) -> crate::Result<CallResult> {
            Ok(CallResult::Json(json!([{"id": "1", "alias": "Morning"}])))
        }
    }

    fn backend() -> AutomationBackend {
        AutomationBackend::with_client(Arc::new(StaticClient))
    }

    fn call_params(value: Value) -> CallToolRequestParam {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_server_info_names_the_server() {
        let info = serde_json::to_value(backend().get_server_info()).unwrap();
        assert_eq!(info["serverInfo"]["name"], SERVER_NAME);
        assert!(info["capabilities"]["tools"].is_object());
    }

    #[test]
    fn test_argument_map_ignores_non_objects() {
        assert!(argument_map(None).is_empty());
        assert!(argument_map(Some(json!(["a"]))).is_empty());
        assert_eq!(argument_map(Some(json!({"a": 1}))).len(), 1);
    }

    #[test]
    fn test_unknown_tool_maps_to_not_supported() {
        let err: BackendError = HaError::unknown_tool("x").into();
        assert!(matches!(err, BackendError::NotSupported(_)));
    }

    #[tokio::test]
    async fn test_call_tool_success_is_not_flagged() {
        let result = backend()
            .call_tool(call_params(json!({"name": "list_automations", "arguments": {}})))
            .await
            .unwrap();

        let result = serde_json::to_value(result).unwrap();
        assert_ne!(result["isError"], true);
        let payload: Value =
            serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(payload["count"], 1);
        assert_eq!(payload["automations"][0]["enabled"], true);
    }

    #[tokio::test]
    async fn test_call_tool_without_arguments() {
        let result = backend()
            .call_tool(call_params(json!({"name": "get_automation"})))
            .await
            .unwrap();

        let result = serde_json::to_value(result).unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("argument error"));
    }

    #[tokio::test]
    async fn test_resources_and_prompts_are_empty() {
        let page = || serde_json::from_value::<PaginatedRequestParam>(json!({})).unwrap();
        let backend = backend();

        let resources = backend.list_resources(page()).await.unwrap();
        assert!(resources.resources.is_empty());
        let prompts = backend.list_prompts(page()).await.unwrap();
        assert!(prompts.prompts.is_empty());
    }
}
