//! HTTP/SSE gateway over the MCP capability set
//!
//! Provides method-string routing, capability invocation, the unary
//! `{result|error}` envelope, and the SSE streaming formatter.

pub mod envelope;
pub mod gateway;
pub mod router;
pub mod stream;
pub mod templates;
