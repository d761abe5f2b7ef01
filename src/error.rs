//! Error types for the Home Assistant automation MCP server
//!
//! Every failure a tool invocation can hit is one variant of [`HaError`].
//! The dispatcher never lets these escape to the transport; they are folded
//! into an error envelope carrying the message and the [`ErrorKind`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, HaError>;

/// Error types for Home Assistant MCP operations
#[derive(Error, Debug)]
pub enum HaError {
    /// Missing or invalid configuration (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed automation source text
    #[error("Parse error: {0}")]
    Parse(String),

    /// Missing or mistyped tool argument
    #[error("Invalid arguments: {0}")]
    Argument(String),

    /// Home Assistant answered with a 4xx/5xx status
    #[error("Remote call failed with HTTP {status}: {body}")]
    RemoteCall { status: u16, body: String },

    /// Request never produced a response (connect, TLS, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response was successful but not shaped as expected
    #[error("Invalid response from Home Assistant: {0}")]
    InvalidResponse(String),

    /// Tool name not present in the catalog
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// MCP server or transport failure
    #[error("MCP transport error: {0}")]
    Transport(String),
}

/// Coarse classification reported to clients as `errorKind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Configuration,
    Parse,
    Argument,
    RemoteCall,
    InvalidResponse,
    UnknownTool,
    Internal,
}

impl ErrorKind {
    /// Stable string form used in error envelopes
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration error",
            ErrorKind::Parse => "parse error",
            ErrorKind::Argument => "argument error",
            ErrorKind::RemoteCall => "remote call error",
            ErrorKind::InvalidResponse => "invalid response",
            ErrorKind::UnknownTool => "unknown tool",
            ErrorKind::Internal => "internal error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl HaError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an argument error
    pub fn argument<S: Into<String>>(msg: S) -> Self {
        Self::Argument(msg.into())
    }

    /// Create a remote call error from a non-success status
    pub fn remote_call<S: Into<String>>(status: u16, body: S) -> Self {
        Self::RemoteCall {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response<S: Into<String>>(msg: S) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create an unknown tool error
    pub fn unknown_tool<S: Into<String>>(name: S) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Self::Transport(msg.into())
    }

    /// Classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            HaError::Config(_) => ErrorKind::Configuration,
            HaError::Parse(_) => ErrorKind::Parse,
            HaError::Argument(_) => ErrorKind::Argument,
            HaError::RemoteCall { .. } | HaError::Http(_) => ErrorKind::RemoteCall,
            HaError::InvalidResponse(_) => ErrorKind::InvalidResponse,
            HaError::UnknownTool(_) => ErrorKind::UnknownTool,
            HaError::Json(_) | HaError::Io(_) | HaError::Transport(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status carried by a remote call failure, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HaError::RemoteCall { status, .. } => Some(*status),
            HaError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for HaError {
    fn from(err: serde_yaml::Error) -> Self {
        HaError::Parse(err.to_string())
    }
}

// Lets mcp-logging classify failures in its structured logs
impl pulseengine_mcp_logging::ErrorClassification for HaError {
    fn error_type(&self) -> &str {
        match self {
            HaError::Config(_) => "config_error",
            HaError::Parse(_) => "parse_error",
            HaError::Argument(_) => "argument_error",
            HaError::RemoteCall { .. } => "remote_call_error",
            HaError::Http(_) => "http_error",
            HaError::InvalidResponse(_) => "invalid_response_error",
            HaError::UnknownTool(_) => "unknown_tool_error",
            HaError::Json(_) => "json_error",
            HaError::Io(_) => "io_error",
            HaError::Transport(_) => "transport_error",
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            HaError::RemoteCall { status, .. } => *status >= 500,
            HaError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    fn is_timeout(&self) -> bool {
        matches!(self, HaError::Http(e) if e.is_timeout())
    }

    fn is_auth_error(&self) -> bool {
        matches!(self, HaError::RemoteCall { status: 401 | 403, .. })
    }

    fn is_connection_error(&self) -> bool {
        matches!(self, HaError::Http(e) if e.is_connect())
    }
}
