//! Tool dispatcher
//!
//! Resolves a tool name against the catalog, validates arguments, runs the
//! handler. [`ToolDispatcher::invoke`] keeps the structured error;
//! [`ToolDispatcher::call_tool`] folds it into an envelope for the transport.

use crate::client::HomeAssistantClient;
use crate::error::Result;
use crate::logging::LoggingMiddleware;
use crate::server::envelope::ResponseEnvelope;
use crate::tools::{automations, catalog, ToolArguments, ToolContext, ToolName};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

#[derive(Clone)]
pub struct ToolDispatcher {
    context: ToolContext,
}

impl ToolDispatcher {
    pub fn new(client: Arc<dyn HomeAssistantClient>) -> Self {
        Self {
            context: ToolContext::new(client),
        }
    }

    /// Catalog advertised to clients
    pub fn list_tools(&self) -> &'static [catalog::ToolDescriptor] {
        catalog::list_tools()
    }

    /// Run a tool, returning the structured error on failure
    pub async fn invoke(&self, name: &str, arguments: Map<String, Value>) -> Result<Value> {
        let tool: ToolName = name.parse()?;
        let args = ToolArguments::validated(tool, arguments)?;
        let ctx = &self.context;

        match tool {
            ToolName::ListAutomations => automations::list_automations(&args, ctx).await,
            ToolName::GetAutomation => automations::get_automation(&args, ctx).await,
            ToolName::CreateAutomation => automations::create_automation(&args, ctx).await,
            ToolName::UpdateAutomation => automations::update_automation(&args, ctx).await,
            ToolName::DeleteAutomation => automations::delete_automation(&args, ctx).await,
            ToolName::TriggerAutomation => automations::trigger_automation(&args, ctx).await,
            ToolName::EnableAutomation => automations::enable_automation(&args, ctx).await,
            ToolName::DisableAutomation => automations::disable_automation(&args, ctx).await,
        }
    }

    /// Run a tool and always produce an envelope
    pub async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> ResponseEnvelope {
        LoggingMiddleware::log_tool_call(name, &Value::Object(arguments.clone()));
        let started = Instant::now();

        let result = self.invoke(name, arguments).await;
        if let Err(e) = &result {
            warn!(tool = name, kind = %e.kind(), "Tool call failed: {e}");
        }

        let envelope = ResponseEnvelope::from_result(result);
        LoggingMiddleware::log_tool_response(
            name,
            started.elapsed().as_millis() as u64,
            !envelope.is_error(),
            envelope.payload(),
        );

        envelope
    }
}
