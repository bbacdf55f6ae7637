//! Ticket-domain integrations exposed over the MCP protocol
//!
//! Provides the tool, resource and prompt catalogs backed by the Zammad API.

pub mod prompts;
pub mod resources;
pub mod tools;
