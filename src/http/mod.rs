//! HTTP transport layer for the gateway
//!
//! Provides the external API routing: health, discovery, and the two
//! `/mcp/*` method-dispatch endpoints.

pub mod handlers;
