//! Model Context Protocol resource providers
//!
//! Exposes helpdesk snapshots as file-like resources under `zammad://` URIs.

use rust_mcp_sdk::schema::Resource;
use serde_json::json;

use crate::core::ResourceContent;
use crate::errors::AppError;
use crate::mcp::templates;
use crate::zammad_client::TicketApi;

pub const GROUPS_RESOURCE_URI: &str = "zammad://groups";
pub const TICKET_RESOURCE_TEMPLATE: &str = "zammad://ticket/{ticket_id}";

pub fn build_resources_list() -> Vec<Resource> {
    vec![
        Resource {
            annotations: None,
            description: Some("Helpdesk groups and their activation state".to_string()),
            icons: vec![],
            meta: None,
            mime_type: Some("application/json".to_string()),
            name: "Groups".to_string(),
            size: None,
            title: None,
            uri: GROUPS_RESOURCE_URI.to_string(),
        },
        Resource {
            annotations: None,
            description: Some("Single ticket with its articles, by numeric id".to_string()),
            icons: vec![],
            meta: None,
            mime_type: Some("application/json".to_string()),
            name: "Ticket".to_string(),
            size: None,
            title: None,
            uri: TICKET_RESOURCE_TEMPLATE.to_string(),
        },
    ]
}

pub async fn read_resource(
    tickets: &dyn TicketApi,
    uri: &str,
) -> Result<ResourceContent, AppError> {
    if uri == GROUPS_RESOURCE_URI {
        let groups = tickets.list_groups().await?;
        return Ok(json_content(json!({ "groups": groups })));
    }

    if let Some(params) = templates::extract_params(uri, TICKET_RESOURCE_TEMPLATE) {
        let ticket_id = params
            .get("ticket_id")
            .and_then(|raw| raw.parse::<u64>().ok())
            .ok_or_else(|| resource_not_found(uri))?;

        let ticket = tickets.get_ticket(ticket_id).await?;
        let articles = tickets.list_ticket_articles(ticket_id).await?;
        return Ok(json_content(json!({
            "ticket": ticket,
            "articles": articles,
        })));
    }

    Err(resource_not_found(uri))
}

fn json_content(value: serde_json::Value) -> ResourceContent {
    ResourceContent {
        mime_type: Some("application/json".to_string()),
        text: Some(value.to_string()),
    }
}

fn resource_not_found(uri: &str) -> AppError {
    AppError::not_found("resource_not_found", format!("Resource not found: {uri}"))
}
