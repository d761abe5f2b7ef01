//! Static tool catalog
//!
//! Built once on first use and read-only afterwards. Order and argument
//! lists are part of the public interface.

use crate::tools::ToolName;
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

/// JSON Schema type of a tool argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentType {
    String,
}

impl ArgumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgumentType::String => "string",
        }
    }
}

/// One argument in a tool's input schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: &'static str,
    pub kind: ArgumentType,
    pub description: &'static str,
    pub required: bool,
}

impl ArgumentSpec {
    const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ArgumentType::String,
            description,
            required: true,
        }
    }

    const fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ArgumentType::String,
            description,
            required: false,
        }
    }
}

/// Name, description and ordered argument schema of a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub tool: ToolName,
    pub description: &'static str,
    pub arguments: Vec<ArgumentSpec>,
}

impl ToolDescriptor {
    pub fn name(&self) -> &'static str {
        self.tool.as_str()
    }

    pub fn required_arguments(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.arguments
            .iter()
            .filter(|arg| arg.required)
            .map(|arg| arg.name)
    }

    /// JSON Schema object advertised to clients
    ///
    /// `required` is omitted entirely when a tool takes no required arguments.
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .arguments
            .iter()
            .map(|arg| {
                (
                    arg.name.to_string(),
                    json!({
                        "type": arg.kind.as_str(),
                        "description": arg.description,
                    }),
                )
            })
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });

        let required: Vec<&str> = self.required_arguments().collect();
        if !required.is_empty() {
            schema["required"] = json!(required);
        }

        schema
    }
}

static CATALOG: Lazy<Vec<ToolDescriptor>> =
    Lazy::new(|| ToolName::ALL.into_iter().map(build_descriptor).collect());

fn build_descriptor(tool: ToolName) -> ToolDescriptor {
    let (description, arguments) = match tool {
        ToolName::ListAutomations => ("List all automations in Home Assistant", vec![]),
        ToolName::GetAutomation => (
            "Get details of a specific automation by ID",
            vec![ArgumentSpec::required(
                "automation_id",
                "The automation ID to retrieve",
            )],
        ),
        ToolName::CreateAutomation => (
            "Create a new automation from YAML configuration",
            vec![
                ArgumentSpec::required(
                    "automation_yaml",
                    "YAML configuration for the automation (single automation object)",
                ),
                // Reserved: advertised for client compatibility, never read.
                ArgumentSpec::optional("alias", "Optional alias/name for the automation"),
            ],
        ),
        ToolName::UpdateAutomation => (
            "Update an existing automation",
            vec![
                ArgumentSpec::required("automation_id", "The automation ID to update"),
                ArgumentSpec::required(
                    "automation_yaml",
                    "Updated YAML configuration for the automation",
                ),
            ],
        ),
        ToolName::DeleteAutomation => (
            "Delete an automation",
            vec![ArgumentSpec::required(
                "automation_id",
                "The automation ID to delete",
            )],
        ),
        ToolName::TriggerAutomation => (
            "Manually trigger an automation",
            vec![ArgumentSpec::required(
                "automation_id",
                "The automation ID to trigger",
            )],
        ),
        ToolName::EnableAutomation => (
            "Enable an automation",
            vec![ArgumentSpec::required(
                "automation_id",
                "The automation ID to enable",
            )],
        ),
        ToolName::DisableAutomation => (
            "Disable an automation",
            vec![ArgumentSpec::required(
                "automation_id",
                "The automation ID to disable",
            )],
        ),
    };

    ToolDescriptor {
        tool,
        description,
        arguments,
    }
}

/// All tool descriptors in catalog order
pub fn list_tools() -> &'static [ToolDescriptor] {
    CATALOG.as_slice()
}

/// Descriptor for a single tool
pub fn descriptor(tool: ToolName) -> &'static ToolDescriptor {
    // CATALOG is built from ToolName::ALL, so the enum order indexes it.
    &CATALOG[tool as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_order_and_uniqueness() {
        let names: Vec<&str> = list_tools().iter().map(ToolDescriptor::name).collect();
        assert_eq!(
            names,
            vec![
                "list_automations",
                "get_automation",
                "create_automation",
                "update_automation",
                "delete_automation",
                "trigger_automation",
                "enable_automation",
                "disable_automation",
            ]
        );

        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[rstest]
    #[case(ToolName::ListAutomations, &[])]
    #[case(ToolName::GetAutomation, &["automation_id"])]
    #[case(ToolName::CreateAutomation, &["automation_yaml"])]
    #[case(ToolName::UpdateAutomation, &["automation_id", "automation_yaml"])]
    #[case(ToolName::DeleteAutomation, &["automation_id"])]
    #[case(ToolName::TriggerAutomation, &["automation_id"])]
    #[case(ToolName::EnableAutomation, &["automation_id"])]
    #[case(ToolName::DisableAutomation, &["automation_id"])]
    fn test_required_arguments(#[case] tool: ToolName, #[case] expected: &[&str]) {
        let required: Vec<&str> = descriptor(tool).required_arguments().collect();
        assert_eq!(required, expected.to_vec());
    }

    #[test]
    fn test_descriptor_lookup_matches_tool() {
        for tool in ToolName::ALL {
            assert_eq!(descriptor(tool).tool, tool);
        }
    }

    #[test]
    fn test_schema_without_required_arguments() {
        let schema = descriptor(ToolName::ListAutomations).input_schema();
        assert_eq!(schema, json!({"type": "object", "properties": {}}));
        assert!(schema.get("required").is_none());
    }

    #[test]
    fn test_create_schema_advertises_optional_alias() {
        let schema = descriptor(ToolName::CreateAutomation).input_schema();

        assert_eq!(schema["properties"]["alias"]["type"], "string");
        assert_eq!(schema["properties"]["automation_yaml"]["type"], "string");
        assert_eq!(schema["required"], json!(["automation_yaml"]));
    }
}
