//! Logging setup and tool-call logging
//!
//! Events go to stderr (stdout belongs to the MCP transport) and optionally
//! to a daily-rotated log file.

use crate::error::{HaError, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Longest automation source kept in a log line
const MAX_LOGGED_SOURCE: usize = 200;

const DEFAULT_LOG_FILE_NAME: &str = "ha-automation-mcp.log";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default level when `RUST_LOG` is unset
    pub level: Level,

    /// Optional log file, rotated daily
    pub file_path: Option<PathBuf>,

    /// Log to stderr
    pub stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            file_path: None,
            stderr: true,
        }
    }
}

impl LogConfig {
    pub fn new(debug: bool, file_path: Option<PathBuf>) -> Self {
        Self {
            level: if debug { Level::DEBUG } else { Level::INFO },
            file_path,
            ..Self::default()
        }
    }

    /// `--debug` wins over `RUST_LOG`
    fn filter(&self) -> EnvFilter {
        if self.level == Level::DEBUG {
            return EnvFilter::new("debug");
        }
        EnvFilter::builder()
            .with_default_directive(self.level.into())
            .from_env_lossy()
    }
}

/// Install the global subscriber
pub fn init_logging(config: LogConfig) -> Result<()> {
    let stderr_layer = config.stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(true)
            .compact()
    });

    let file_layer = match &config.file_path {
        Some(path) => {
            let (dir, file_name) = split_log_path(path);
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(dir, file_name);
            Some(fmt::layer().with_writer(appender).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(config.filter())
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| HaError::config(format!("Failed to initialize logging: {e}")))
}

fn split_log_path(path: &Path) -> (PathBuf, String) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string());
    (dir, file_name)
}

/// Logging middleware for MCP tool calls
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    /// Log tool invocation
    pub fn log_tool_call(tool_name: &str, arguments: &Value) {
        let sanitized = Self::sanitize_arguments(arguments);

        tracing::info!(tool = tool_name, arguments = %sanitized, "MCP tool called");
    }

    /// Log tool completion
    pub fn log_tool_response(tool_name: &str, duration_ms: u64, success: bool, response: &Value) {
        if success {
            tracing::info!(tool = tool_name, duration_ms, "MCP tool completed successfully");
            tracing::debug!(tool = tool_name, response = %response, "MCP tool response");
        } else {
            tracing::error!(
                tool = tool_name,
                duration_ms,
                response = %response,
                "MCP tool failed"
            );
        }
    }

    /// Mask credentials and shorten automation source text
    fn sanitize_arguments(arguments: &Value) -> Value {
        match arguments {
            Value::Object(map) => {
                let mut sanitized = Map::new();
                for (key, value) in map {
                    let value = if Self::is_sensitive_field(key) {
                        Value::String("***".to_string())
                    } else if key == "automation_yaml" {
                        Self::truncate_source(value)
                    } else {
                        Self::sanitize_arguments(value)
                    };
                    sanitized.insert(key.clone(), value);
                }
                Value::Object(sanitized)
            }
            Value::Array(items) => Value::Array(items.iter().map(Self::sanitize_arguments).collect()),
            _ => arguments.clone(),
        }
    }

    fn truncate_source(value: &Value) -> Value {
        match value.as_str() {
            Some(text) if text.chars().count() > MAX_LOGGED_SOURCE => {
                let head: String = text.chars().take(MAX_LOGGED_SOURCE).collect();
                Value::String(format!("{head}... (truncated, {} bytes total)", text.len()))
            }
            _ => value.clone(),
        }
    }

    fn is_sensitive_field(field: &str) -> bool {
        let field = field.to_lowercase();
        ["password", "secret", "token", "api_key", "apikey", "auth", "credential"]
            .iter()
            .any(|marker| field.contains(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_sensitive_fields() {
        let arguments = json!({
            "automation_id": "morning_lights",
            "access_token": "abc123",
            "Authorization": "Bearer abc123",
            "nested": {"password": "hunter2", "alias": "Morning"}
        });

        let sanitized = LoggingMiddleware::sanitize_arguments(&arguments);

        assert_eq!(sanitized["automation_id"], "morning_lights");
        assert_eq!(sanitized["access_token"], "***");
        assert_eq!(sanitized["Authorization"], "***");
        assert_eq!(sanitized["nested"]["password"], "***");
        assert_eq!(sanitized["nested"]["alias"], "Morning");
    }

    #[test]
    fn test_long_automation_source_is_truncated() {
        let source = "alias: x\n".repeat(100);
        let sanitized =
            LoggingMiddleware::sanitize_arguments(&json!({ "automation_yaml": source.clone() }));

        let logged = sanitized["automation_yaml"].as_str().unwrap();
        assert!(logged.len() < source.len());
        assert!(logged.ends_with(&format!("{} bytes total)", source.len())));
    }

    #[test]
    fn test_short_automation_source_is_kept() {
        let sanitized = LoggingMiddleware::sanitize_arguments(&json!({"automation_yaml": "alias: x"}));
        assert_eq!(sanitized["automation_yaml"], "alias: x");
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("logs/server.log"));
        assert_eq!(dir, PathBuf::from("logs"));
        assert_eq!(name, "server.log");

        let (dir, name) = split_log_path(Path::new("server.log"));
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "server.log");
    }

    #[test]
    fn test_debug_flag_sets_level() {
        assert_eq!(LogConfig::new(true, None).level, Level::DEBUG);
        assert_eq!(LogConfig::new(false, None).level, Level::INFO);
    }
}
