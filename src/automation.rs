//! Automation payload helpers
//!
//! Home Assistant owns the automation model. These helpers only turn YAML
//! source text into the JSON tree the write endpoints accept, and reduce a
//! listing to the handful of fields the `list_automations` tool reports.

use crate::error::{HaError, Result};
use serde::Serialize;
use serde_json::Value;

/// Parse one automation from YAML source text
///
/// Only structure is checked: the document must be a mapping. Anchors and
/// `<<` merge keys are resolved; trigger, condition and action blocks are
/// otherwise passed through untouched.
pub fn parse_automation_source(source: &str) -> Result<Value> {
    let mut yaml: serde_yaml::Value = serde_yaml::from_str(source)?;
    yaml.apply_merge()?;

    let value = serde_json::to_value(yaml)
        .map_err(|e| HaError::parse(format!("automation source is not JSON-compatible: {e}")))?;

    match value {
        Value::Object(_) => Ok(value),
        Value::Null => Err(HaError::parse("automation source is empty")),
        other => Err(HaError::parse(format!(
            "automation source must be a mapping, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

/// Listing entry reported by `list_automations`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutomationSummary {
    pub id: Value,
    pub alias: Value,
    /// Defaults to `true` when the controller omits it
    pub enabled: Value,
    pub description: Value,
}

impl AutomationSummary {
    pub fn from_entity(entity: &Value) -> Self {
        let field = |name: &str| entity.get(name).cloned().unwrap_or(Value::Null);

        Self {
            id: field("id"),
            alias: field("alias"),
            enabled: entity.get("enabled").cloned().unwrap_or(Value::Bool(true)),
            description: field("description"),
        }
    }
}

/// Summaries for a listing response
///
/// Accepts either a bare list or an object wrapping the list under
/// `automations`. Anything else yields an empty listing.
pub fn summarize_listing(listing: &Value) -> Vec<AutomationSummary> {
    let entries: &[Value] = match listing {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("automations") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    entries.iter().map(AutomationSummary::from_entity).collect()
}
