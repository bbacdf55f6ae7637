//! Reusable prompt templates rendered from live ticket data.

use rust_mcp_sdk::schema::{
    ContentBlock, GetPromptResult, Prompt, PromptArgument, PromptMessage, Role, TextContent,
};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::zammad_client::{Article, Ticket, TicketApi};

pub fn build_prompts_list() -> Vec<Prompt> {
    vec![
        Prompt {
            arguments: vec![PromptArgument {
                description: Some("Numeric ticket id".to_string()),
                name: "ticket_id".to_string(),
                required: Some(true),
                title: None,
            }],
            description: Some("Summarize a ticket and its conversation so far".to_string()),
            icons: vec![],
            meta: None,
            name: "summarize_ticket".to_string(),
            title: None,
        },
        Prompt {
            arguments: vec![
                PromptArgument {
                    description: Some("Numeric ticket id".to_string()),
                    name: "ticket_id".to_string(),
                    required: Some(true),
                    title: None,
                },
                PromptArgument {
                    description: Some("Desired tone of the reply".to_string()),
                    name: "tone".to_string(),
                    required: Some(false),
                    title: None,
                },
            ],
            description: Some("Draft a customer reply for a ticket".to_string()),
            icons: vec![],
            meta: None,
            name: "draft_reply".to_string(),
            title: None,
        },
    ]
}

pub async fn handle_prompt_get(
    tickets: &dyn TicketApi,
    name: &str,
    arguments: Map<String, Value>,
) -> Result<GetPromptResult, AppError> {
    match name {
        "summarize_ticket" => {
            let ticket_id = ticket_id_argument(&arguments)?;
            let ticket = tickets.get_ticket(ticket_id).await?;
            let articles = tickets.list_ticket_articles(ticket_id).await?;

            let text = format!(
                "Summarize the following helpdesk ticket for a support engineer. \
                 Mention the current state, who is waiting on whom, and any deadline.\n\n{}",
                render_ticket(&ticket, &articles),
            );

            Ok(prompt_result(
                format!("Summary request for ticket {ticket_id}"),
                text,
            ))
        }
        "draft_reply" => {
            let ticket_id = ticket_id_argument(&arguments)?;
            let tone = arguments
                .get("tone")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|tone| !tone.is_empty())
                .unwrap_or("friendly and professional");

            let ticket = tickets.get_ticket(ticket_id).await?;
            let articles = tickets.list_ticket_articles(ticket_id).await?;

            let text = format!(
                "Draft a {tone} reply to the customer on the following helpdesk ticket. \
                 Answer the most recent customer message and do not invent facts.\n\n{}",
                render_ticket(&ticket, &articles),
            );

            Ok(prompt_result(
                format!("Reply draft for ticket {ticket_id}"),
                text,
            ))
        }
        _ => Err(AppError::not_found(
            "prompt_not_found",
            format!("Prompt not found: {name}"),
        )),
    }
}

/// Prompt params arrive untyped from the method string form, so numeric ids
/// are accepted both as numbers and as numeric strings.
fn ticket_id_argument(arguments: &Map<String, Value>) -> Result<u64, AppError> {
    let raw = arguments.get("ticket_id").ok_or_else(|| {
        AppError::bad_request("missing_ticket_id", "ticket_id argument is required")
    })?;

    match raw {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| {
        AppError::bad_request(
            "invalid_ticket_id",
            "ticket_id must be a positive integer",
        )
    })
}

fn render_ticket(ticket: &Ticket, articles: &[Article]) -> String {
    let mut lines = vec![format!(
        "Ticket {}: {}",
        ticket
            .number
            .clone()
            .unwrap_or_else(|| ticket.id.to_string()),
        ticket.title
    )];
    if let Some(state) = ticket.state.as_deref() {
        lines.push(format!("State: {state}"));
    }
    if let Some(group) = ticket.group.as_deref() {
        lines.push(format!("Group: {group}"));
    }
    if let Some(customer) = ticket.customer.as_deref() {
        lines.push(format!("Customer: {customer}"));
    }

    for article in articles {
        let sender = article.sender.as_deref().unwrap_or("unknown");
        lines.push(format!("--- {} wrote:\n{}", sender, article.body));
    }

    lines.join("\n")
}

fn prompt_result(description: String, text: String) -> GetPromptResult {
    GetPromptResult {
        description: Some(description),
        messages: vec![PromptMessage {
            content: ContentBlock::from(TextContent::new(text, None, None)),
            role: Role::User,
        }],
        meta: None,
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::{json, Map};

    use super::{build_prompts_list, handle_prompt_get};
    use crate::errors::AppError;
    use crate::zammad_client::{Article, Group, Ticket, TicketApi, User};

    struct MockTickets;

    #[async_trait]
    impl TicketApi for MockTickets {
        async fn current_user(&self) -> Result<User, AppError> {
            unreachable!("prompts never resolve the current user")
        }

        async fn get_ticket(&self, ticket_id: u64) -> Result<Ticket, AppError> {
            Ok(Ticket {
                id: ticket_id,
                number: Some("20260042".to_string()),
                title: "Printer on fire".to_string(),
                group: Some("Users".to_string()),
                state: Some("open".to_string()),
                priority: None,
                customer: Some("jane.doe@example.com".to_string()),
                owner: None,
                created_at: None,
                updated_at: None,
            })
        }

        async fn search_tickets(
            &self,
            _query: &str,
            _limit: usize,
        ) -> Result<Vec<Ticket>, AppError> {
            Ok(vec![])
        }

        async fn list_ticket_articles(&self, ticket_id: u64) -> Result<Vec<Article>, AppError> {
            Ok(vec![Article {
                id: 1,
                ticket_id,
                from: None,
                to: None,
                subject: None,
                body: "It is still burning.".to_string(),
                content_type: None,
                internal: None,
                sender: Some("Customer".to_string()),
                created_at: None,
            }])
        }

        async fn list_groups(&self) -> Result<Vec<Group>, AppError> {
            Ok(vec![])
        }
    }

    #[test]
    fn catalog_declares_required_ticket_id() {
        let prompts = build_prompts_list();
        assert_eq!(prompts[0].name, "summarize_ticket");
        assert_eq!(prompts[0].arguments[0].name, "ticket_id");
        assert_eq!(prompts[0].arguments[0].required, Some(true));
        assert_eq!(prompts[1].name, "draft_reply");
    }

    #[tokio::test]
    async fn summarize_ticket_embeds_conversation() {
        let arguments = Map::from_iter([("ticket_id".to_string(), json!("42"))]);
        let result = handle_prompt_get(&MockTickets, "summarize_ticket", arguments)
            .await
            .expect("prompt should render");

        assert_eq!(result.messages.len(), 1);
        let rendered = serde_json::to_value(&result).expect("serializable prompt result");
        let text = rendered["messages"][0]["content"]["text"]
            .as_str()
            .expect("text content");
        assert!(text.contains("Printer on fire"));
        assert!(text.contains("It is still burning."));
    }

    #[tokio::test]
    async fn draft_reply_defaults_tone() {
        let arguments = Map::from_iter([("ticket_id".to_string(), json!(42))]);
        let result = handle_prompt_get(&MockTickets, "draft_reply", arguments)
            .await
            .expect("prompt should render");

        let rendered = serde_json::to_value(&result).expect("serializable prompt result");
        let text = rendered["messages"][0]["content"]["text"]
            .as_str()
            .expect("text content");
        assert!(text.contains("friendly and professional"));
    }

    #[tokio::test]
    async fn missing_ticket_id_is_bad_request() {
        let error = handle_prompt_get(&MockTickets, "summarize_ticket", Map::new())
            .await
            .expect_err("expected missing argument error");
        assert!(matches!(error, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn unknown_prompt_is_not_found() {
        let error = handle_prompt_get(&MockTickets, "nope", Map::new())
            .await
            .expect_err("expected unknown prompt error");
        assert!(matches!(error, AppError::NotFound { .. }));
    }
}
