//! Interactive ticket tools exposed via Model Context Protocol
//!
//! Provides `search_tickets`, `get_ticket` and `list_groups` by delegating to
//! the `TicketApi` Zammad implementation dynamically.

use chrono::{SecondsFormat, Utc};
use rust_mcp_sdk::{
    macros,
    schema::{CallToolResult, ContentBlock, TextContent, Tool},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::AppError;
use crate::zammad_client::TicketApi;

pub const MAX_SEARCH_LIMIT: usize = 100;
pub const DEFAULT_SEARCH_LIMIT: usize = 25;

#[macros::mcp_tool(
    name = "search_tickets",
    description = "Search helpdesk tickets with a free-text query"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct SearchTicketsTool {
    pub query: String,
    pub limit: Option<u32>,
}

#[macros::mcp_tool(
    name = "get_ticket",
    description = "Fetch a single ticket by id, optionally with its articles"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct GetTicketTool {
    pub ticket_id: u64,
    pub include_articles: Option<bool>,
}

#[macros::mcp_tool(
    name = "list_groups",
    description = "List helpdesk groups and whether they are active"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct ListGroupsTool {
    pub active_only: Option<bool>,
}

pub fn build_tools_list() -> Vec<Tool> {
    vec![
        SearchTicketsTool::tool(),
        GetTicketTool::tool(),
        ListGroupsTool::tool(),
    ]
}

pub async fn handle_tool_call(
    tickets: &dyn TicketApi,
    name: &str,
    arguments: Map<String, Value>,
) -> Result<CallToolResult, AppError> {
    match name {
        "search_tickets" => {
            let args: SearchTicketsTool = parse_arguments(arguments)?;
            let query = normalize_query(&args.query)?;
            let limit = normalize_search_limit(args.limit)?;
            handle_search_tickets(tickets, &query, limit).await
        }
        "get_ticket" => {
            let args: GetTicketTool = parse_arguments(arguments)?;
            handle_get_ticket(tickets, args.ticket_id, args.include_articles.unwrap_or(false))
                .await
        }
        "list_groups" => {
            let args: ListGroupsTool = parse_arguments(arguments)?;
            handle_list_groups(tickets, args.active_only.unwrap_or(false)).await
        }
        _ => Err(AppError::not_found(
            "tool_not_found",
            format!("Tool not found: {name}"),
        )),
    }
}

fn parse_arguments<T: serde::de::DeserializeOwned>(
    arguments: Map<String, Value>,
) -> Result<T, AppError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|err| AppError::bad_request("invalid_arguments", format!("invalid tool arguments: {err}")))
}

pub fn normalize_query(query: &str) -> Result<String, AppError> {
    let normalized = query.trim();
    if normalized.is_empty() {
        return Err(AppError::bad_request(
            "invalid_query",
            "query must not be empty",
        ));
    }

    Ok(normalized.to_string())
}

pub fn normalize_search_limit(limit: Option<u32>) -> Result<usize, AppError> {
    let limit = limit.map(|value| value as usize).unwrap_or(DEFAULT_SEARCH_LIMIT);
    if limit == 0 || limit > MAX_SEARCH_LIMIT {
        return Err(AppError::bad_request(
            "invalid_limit",
            "limit must be between 1 and 100",
        ));
    }

    Ok(limit)
}

async fn handle_search_tickets(
    tickets: &dyn TicketApi,
    query: &str,
    limit: usize,
) -> Result<CallToolResult, AppError> {
    let found = tickets.search_tickets(query, limit).await?;
    let returned = found.len();
    let truncated = returned >= limit;
    let generated_at_utc = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    Ok(CallToolResult {
        content: vec![ContentBlock::from(TextContent::new(
            format!("Returned {returned} tickets for query \"{query}\""),
            None,
            None,
        ))],
        is_error: None,
        meta: None,
        structured_content: Some(Map::from_iter([
            ("tickets".to_string(), json!(found)),
            ("returned".to_string(), json!(returned)),
            ("truncated".to_string(), json!(truncated)),
            ("generated_at_utc".to_string(), json!(generated_at_utc)),
        ])),
    })
}

async fn handle_get_ticket(
    tickets: &dyn TicketApi,
    ticket_id: u64,
    include_articles: bool,
) -> Result<CallToolResult, AppError> {
    let ticket = tickets.get_ticket(ticket_id).await?;
    let articles = if include_articles {
        Some(tickets.list_ticket_articles(ticket_id).await?)
    } else {
        None
    };

    let summary = match ticket.number.as_deref() {
        Some(number) => format!("Fetched ticket #{number}: {}", ticket.title),
        None => format!("Fetched ticket {ticket_id}: {}", ticket.title),
    };

    let mut structured = Map::from_iter([("ticket".to_string(), json!(ticket))]);
    if let Some(articles) = articles {
        structured.insert("articles".to_string(), json!(articles));
    }

    Ok(CallToolResult {
        content: vec![ContentBlock::from(TextContent::new(summary, None, None))],
        is_error: None,
        meta: None,
        structured_content: Some(structured),
    })
}

async fn handle_list_groups(
    tickets: &dyn TicketApi,
    active_only: bool,
) -> Result<CallToolResult, AppError> {
    let mut groups = tickets.list_groups().await?;
    if active_only {
        groups.retain(|group| group.active.unwrap_or(false));
    }
    let returned = groups.len();

    Ok(CallToolResult {
        content: vec![ContentBlock::from(TextContent::new(
            format!("Returned {returned} groups"),
            None,
            None,
        ))],
        is_error: None,
        meta: None,
        structured_content: Some(Map::from_iter([
            ("groups".to_string(), json!(groups)),
            ("returned".to_string(), json!(returned)),
        ])),
    })
}
