//! Home Assistant automation MCP server
//!
//! Exposes eight Model Context Protocol tools that list, inspect, create,
//! update, delete, trigger, enable and disable Home Assistant automations
//! through the controller's REST API.
//!
//! The layers, leaf first:
//!
//! - [`client`]: one authenticated HTTP call, normalized into a [`client::CallResult`]
//! - [`tools`]: the static tool catalog and one handler per tool
//! - [`server`]: the dispatcher and the response envelope
//! - [`framework_integration`]: the PulseEngine MCP backend served over stdio

pub mod automation;
pub mod client;
pub mod config;
pub mod error;
pub mod framework_integration;
pub mod logging;
pub mod server;
pub mod tools;

pub use client::{HaHttpClient, HomeAssistantClient};
pub use config::HaConfig;
pub use error::{HaError, Result};
pub use framework_integration::AutomationBackend;
pub use server::{ResponseEnvelope, ToolDispatcher};
