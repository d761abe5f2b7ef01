//! Automation tools
//!
//! Each handler maps validated arguments onto REST calls and shapes the
//! success payload. Errors propagate to the dispatcher untouched.

use crate::automation::{parse_automation_source, summarize_listing};
use crate::client::HttpMethod;
use crate::error::{HaError, Result};
use crate::tools::{ToolArguments, ToolContext};
use serde_json::{json, Value};
use tracing::debug;

const AUTOMATION_ID: &str = "automation_id";
const AUTOMATION_YAML: &str = "automation_yaml";

/// Collection endpoint
pub const AUTOMATIONS_PATH: &str = "/automation";

/// Endpoint of a single automation; the id is percent-encoded so it stays
/// within one path segment.
///
/// Empty, `.` and `..` ids are refused: percent-encoding leaves them as is
/// and they would resolve to the collection or the API root.
pub fn automation_path(automation_id: &str) -> Result<String> {
    if matches!(automation_id, "" | "." | "..") {
        return Err(HaError::argument(format!("invalid automation_id '{automation_id}'")));
    }
    Ok(format!("{AUTOMATIONS_PATH}/{}", urlencoding::encode(automation_id)))
}

/// Target of a single-automation tool
struct AutomationRef {
    path: String,
    /// Id as the caller sent it, echoed back in status payloads
    id: Value,
}

impl AutomationRef {
    fn from_args(args: &ToolArguments) -> Result<Self> {
        let automation_id = args.required_str(AUTOMATION_ID)?;
        let path = automation_path(&automation_id)?;
        let id = args
            .raw(AUTOMATION_ID)
            .cloned()
            .unwrap_or(Value::String(automation_id));
        Ok(Self { path, id })
    }
}

pub async fn list_automations(_args: &ToolArguments, ctx: &ToolContext) -> Result<Value> {
    let listing = ctx
        .client
        .call(HttpMethod::Get, AUTOMATIONS_PATH, None)
        .await?
        .into_value();

    let automations = summarize_listing(&listing);

    Ok(json!({
        "count": automations.len(),
        "automations": automations,
    }))
}

pub async fn get_automation(args: &ToolArguments, ctx: &ToolContext) -> Result<Value> {
    let target = AutomationRef::from_args(args)?;

    let result = ctx.client.call(HttpMethod::Get, &target.path, None).await?;

    Ok(result.into_value())
}

pub async fn create_automation(args: &ToolArguments, ctx: &ToolContext) -> Result<Value> {
    let automation = parse_automation_source(args.required_text(AUTOMATION_YAML)?)?;

    if args.contains("alias") {
        debug!("create_automation: 'alias' argument is reserved and ignored");
    }

    let result = ctx
        .client
        .call(HttpMethod::Post, AUTOMATIONS_PATH, Some(&automation))
        .await?;

    Ok(json!({
        "status": "created",
        "result": result.into_value(),
    }))
}

pub async fn update_automation(args: &ToolArguments, ctx: &ToolContext) -> Result<Value> {
    let target = AutomationRef::from_args(args)?;
    let automation = parse_automation_source(args.required_text(AUTOMATION_YAML)?)?;

    let result = ctx
        .client
        .call(HttpMethod::Put, &target.path, Some(&automation))
        .await?;

    Ok(json!({
        "status": "updated",
        "result": result.into_value(),
    }))
}

pub async fn delete_automation(args: &ToolArguments, ctx: &ToolContext) -> Result<Value> {
    let target = AutomationRef::from_args(args)?;

    ctx.client
        .call(HttpMethod::Delete, &target.path, None)
        .await?;

    Ok(json!({
        "status": "deleted",
        "automation_id": target.id,
    }))
}

pub async fn trigger_automation(args: &ToolArguments, ctx: &ToolContext) -> Result<Value> {
    let target = AutomationRef::from_args(args)?;
    let path = format!("{}/trigger", target.path);

    ctx.client.call(HttpMethod::Post, &path, None).await?;

    Ok(json!({
        "status": "triggered",
        "automation_id": target.id,
    }))
}

pub async fn enable_automation(args: &ToolArguments, ctx: &ToolContext) -> Result<Value> {
    set_enabled(args, ctx, true).await
}

pub async fn disable_automation(args: &ToolArguments, ctx: &ToolContext) -> Result<Value> {
    set_enabled(args, ctx, false).await
}

/// Fetch, flip `enabled`, write back the whole entity.
///
/// Not atomic: a change made by someone else between the two calls is
/// overwritten. A failed write is reported as-is, with no rollback.
async fn set_enabled(args: &ToolArguments, ctx: &ToolContext, enabled: bool) -> Result<Value> {
    let target = AutomationRef::from_args(args)?;

    let mut current = ctx
        .client
        .call(HttpMethod::Get, &target.path, None)
        .await?
        .into_json()?;

    let fields = current.as_object_mut().ok_or_else(|| {
        HaError::invalid_response(format!("automation {} is not a JSON object", target.id))
    })?;
    fields.insert("enabled".to_string(), Value::Bool(enabled));

    ctx.client
        .call(HttpMethod::Put, &target.path, Some(&current))
        .await?;

    Ok(json!({
        "status": if enabled { "enabled" } else { "disabled" },
        "automation_id": target.id,
    }))
}
