use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub id: u64,
    pub number: Option<String>,
    pub title: String,
    pub group: Option<String>,
    pub state: Option<String>,
    pub priority: Option<String>,
    pub customer: Option<String>,
    pub owner: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub id: u64,
    pub ticket_id: u64,
    pub from: Option<String>,
    pub to: Option<String>,
    pub subject: Option<String>,
    pub body: String,
    pub content_type: Option<String>,
    pub internal: Option<bool>,
    pub sender: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: u64,
    pub name: String,
    pub active: Option<bool>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: u64,
    pub login: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
}

#[async_trait]
pub trait TicketApi: Send + Sync {
    async fn current_user(&self) -> Result<User, AppError>;
    async fn get_ticket(&self, ticket_id: u64) -> Result<Ticket, AppError>;
    async fn search_tickets(&self, query: &str, limit: usize) -> Result<Vec<Ticket>, AppError>;
    async fn list_ticket_articles(&self, ticket_id: u64) -> Result<Vec<Article>, AppError>;
    async fn list_groups(&self) -> Result<Vec<Group>, AppError>;
}

/// Zammad REST client. Uses `expand=true` so references (group, state,
/// priority, customer) arrive as display strings instead of numeric ids.
#[derive(Debug, Clone)]
pub struct HttpZammadClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpZammadClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|err| AppError::internal(format!("failed to build http client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let url = format!("{}/api/v1/{path}", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, format!("Token token={}", self.token))
            .query(query)
            .send()
            .await
            .map_err(|err| AppError::internal(format!("zammad request failed: {err}")))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|err| AppError::internal(format!("zammad response decoding failed: {err}")));
        }

        Err(match status {
            StatusCode::NOT_FOUND => {
                AppError::not_found("zammad_not_found", format!("zammad object not found: {path}"))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                AppError::unauthorized("zammad_rejected_token", "zammad rejected the API token")
            }
            StatusCode::UNPROCESSABLE_ENTITY => AppError::bad_request(
                "zammad_rejected_request",
                format!("zammad rejected the request to {path}"),
            ),
            other => AppError::internal(format!("zammad returned status {other} for {path}")),
        })
    }
}

#[async_trait]
impl TicketApi for HttpZammadClient {
    async fn current_user(&self) -> Result<User, AppError> {
        self.get_json("users/me", &[]).await
    }

    async fn get_ticket(&self, ticket_id: u64) -> Result<Ticket, AppError> {
        self.get_json(
            &format!("tickets/{ticket_id}"),
            &[("expand", "true".to_string())],
        )
        .await
    }

    async fn search_tickets(&self, query: &str, limit: usize) -> Result<Vec<Ticket>, AppError> {
        self.get_json(
            "tickets/search",
            &[
                ("query", query.to_string()),
                ("limit", limit.to_string()),
                ("expand", "true".to_string()),
            ],
        )
        .await
    }

    async fn list_ticket_articles(&self, ticket_id: u64) -> Result<Vec<Article>, AppError> {
        self.get_json(
            &format!("ticket_articles/by_ticket/{ticket_id}"),
            &[("expand", "true".to_string())],
        )
        .await
    }

    async fn list_groups(&self) -> Result<Vec<Group>, AppError> {
        self.get_json("groups", &[]).await
    }
}
