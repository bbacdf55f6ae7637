//! Boundary to the underlying RPC core.
//!
//! The HTTP/SSE gateway only ever talks to [`McpCore`]; the concrete
//! [`ZammadCore`] wires the six capabilities to the ticket domain handlers.

use std::sync::Arc;

use async_trait::async_trait;
use rust_mcp_sdk::schema::{CallToolResult, GetPromptResult, Prompt, Resource, Tool};
use serde_json::{Map, Value};
use tracing::info;

use crate::domain::{prompts, resources, tools};
use crate::errors::AppError;
use crate::zammad_client::TicketApi;

/// Raw resource payload as produced by the core; the gateway fills in the
/// `contents` wrapper and defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceContent {
    pub mime_type: Option<String>,
    pub text: Option<String>,
}

#[async_trait]
pub trait McpCore: Send + Sync {
    /// Invoked once at process startup, before any request is served.
    async fn initialize(&self) -> Result<(), AppError>;

    async fn list_tools(&self) -> Result<Vec<Tool>, AppError>;
    async fn list_resources(&self) -> Result<Vec<Resource>, AppError>;
    async fn list_prompts(&self) -> Result<Vec<Prompt>, AppError>;

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<CallToolResult, AppError>;
    async fn read_resource(&self, uri: &str) -> Result<ResourceContent, AppError>;
    async fn get_prompt(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<GetPromptResult, AppError>;
}

pub struct ZammadCore {
    tickets: Arc<dyn TicketApi>,
}

impl ZammadCore {
    pub fn new(tickets: Arc<dyn TicketApi>) -> Self {
        Self { tickets }
    }
}

#[async_trait]
impl McpCore for ZammadCore {
    async fn initialize(&self) -> Result<(), AppError> {
        let user = self.tickets.current_user().await?;
        info!(
            user_id = user.id,
            login = user.login.as_deref().unwrap_or("<unknown>"),
            "zammad connection verified"
        );
        Ok(())
    }

    async fn list_tools(&self) -> Result<Vec<Tool>, AppError> {
        Ok(tools::build_tools_list())
    }

    async fn list_resources(&self) -> Result<Vec<Resource>, AppError> {
        Ok(resources::build_resources_list())
    }

    async fn list_prompts(&self) -> Result<Vec<Prompt>, AppError> {
        Ok(prompts::build_prompts_list())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<CallToolResult, AppError> {
        tools::handle_tool_call(self.tickets.as_ref(), name, arguments).await
    }

    async fn read_resource(&self, uri: &str) -> Result<ResourceContent, AppError> {
        resources::read_resource(self.tickets.as_ref(), uri).await
    }

    async fn get_prompt(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<GetPromptResult, AppError> {
        prompts::handle_prompt_get(self.tickets.as_ref(), name, arguments).await
    }
}
