//! MCP tool implementations for Home Assistant automation management
//!
//! Eight tools, each a thin translation from arguments to one or two REST
//! calls. [`catalog`] describes them, [`automations`] implements them.

pub mod automations;
pub mod catalog;

use crate::client::HomeAssistantClient;
use crate::error::{HaError, Result};
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::Arc;

/// Closed set of tools this server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ListAutomations,
    GetAutomation,
    CreateAutomation,
    UpdateAutomation,
    DeleteAutomation,
    TriggerAutomation,
    EnableAutomation,
    DisableAutomation,
}

impl ToolName {
    /// Catalog order
    pub const ALL: [ToolName; 8] = [
        ToolName::ListAutomations,
        ToolName::GetAutomation,
        ToolName::CreateAutomation,
        ToolName::UpdateAutomation,
        ToolName::DeleteAutomation,
        ToolName::TriggerAutomation,
        ToolName::EnableAutomation,
        ToolName::DisableAutomation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::ListAutomations => "list_automations",
            ToolName::GetAutomation => "get_automation",
            ToolName::CreateAutomation => "create_automation",
            ToolName::UpdateAutomation => "update_automation",
            ToolName::DeleteAutomation => "delete_automation",
            ToolName::TriggerAutomation => "trigger_automation",
            ToolName::EnableAutomation => "enable_automation",
            ToolName::DisableAutomation => "disable_automation",
        }
    }
}

impl FromStr for ToolName {
    type Err = HaError;

    fn from_str(name: &str) -> Result<Self> {
        ToolName::ALL
            .into_iter()
            .find(|tool| tool.as_str() == name)
            .ok_or_else(|| HaError::unknown_tool(name))
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared dependencies handed to every tool handler
#[derive(Clone)]
pub struct ToolContext {
    pub client: Arc<dyn HomeAssistantClient>,
}

impl ToolContext {
    pub fn new(client: Arc<dyn HomeAssistantClient>) -> Self {
        Self { client }
    }
}

/// Tool arguments after presence checks against the catalog
#[derive(Debug, Clone)]
pub struct ToolArguments {
    tool: ToolName,
    values: Map<String, Value>,
}

impl ToolArguments {
    /// Check every required argument of `tool` is present and non-null
    pub fn validated(tool: ToolName, values: Map<String, Value>) -> Result<Self> {
        let descriptor = catalog::descriptor(tool);
        let missing: Vec<&str> = descriptor
            .required_arguments()
            .filter(|name| values.get(*name).map_or(true, Value::is_null))
            .collect();

        if !missing.is_empty() {
            return Err(HaError::argument(format!(
                "{tool} is missing required argument(s): {}",
                missing.join(", ")
            )));
        }

        Ok(Self { tool, values })
    }

    /// Required string argument; numeric ids are accepted as their text
    pub fn required_str(&self, name: &str) -> Result<String> {
        match self.values.get(name) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Null) | None => Err(HaError::argument(format!(
                "{} is missing required argument: {name}",
                self.tool
            ))),
            Some(_) => Err(HaError::argument(format!(
                "{}: argument '{name}' must be a string",
                self.tool
            ))),
        }
    }

    /// Required argument that must be given as text (no number coercion)
    pub fn required_text(&self, name: &str) -> Result<&str> {
        match self.values.get(name) {
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(Value::Null) | None => Err(HaError::argument(format!(
                "{} is missing required argument: {name}",
                self.tool
            ))),
            Some(_) => Err(HaError::argument(format!(
                "{}: argument '{name}' must be a string",
                self.tool
            ))),
        }
    }

    /// Argument exactly as the caller sent it
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}
