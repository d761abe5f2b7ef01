//! Tool dispatch and response envelopes
//!
//! Protocol framing lives in [`crate::framework_integration`]; this module
//! only turns a tool name plus arguments into a [`ResponseEnvelope`].

pub mod dispatcher;
pub mod envelope;

pub use dispatcher::ToolDispatcher;
pub use envelope::ResponseEnvelope;
