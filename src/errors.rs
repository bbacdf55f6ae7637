use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {message}")]
    NotFound { code: &'static str, message: String },
    #[error("bad request: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("unauthorized: {message}")]
    Unauthorized {
        code: &'static str,
        message: &'static str,
    },
    #[error("internal error: {message}")]
    Internal { code: &'static str, message: String },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

impl AppError {
    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(code: &'static str, message: &'static str) -> Self {
        Self::Unauthorized { code, message }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            code: "internal_error",
            message: message.into(),
        }
    }

    /// JSON-RPC style code carried in envelope errors and SSE error events.
    pub fn rpc_code(&self) -> i64 {
        match self {
            Self::NotFound { .. } => -32601,
            Self::BadRequest { .. } => -32602,
            Self::Unauthorized { .. } => -32001,
            Self::Internal { .. } => -32603,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Self::NotFound { message, .. } => message,
            Self::BadRequest { message, .. } => message,
            Self::Unauthorized { message, .. } => message,
            Self::Internal { message, .. } => message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, code, message),
            Self::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            Self::Unauthorized { code, message } => {
                (StatusCode::UNAUTHORIZED, code, message.to_string())
            }
            Self::Internal { code, message } => {
                tracing::error!(error = %message, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    code,
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                code: code.to_string(),
                message,
                details: json!({}),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn maps_error_kinds_to_rpc_codes() {
        assert_eq!(
            AppError::not_found("method_not_found", "Method not found: x").rpc_code(),
            -32601
        );
        assert_eq!(
            AppError::bad_request("missing_tool_name", "name is required").rpc_code(),
            -32602
        );
        assert_eq!(
            AppError::unauthorized("invalid_token", "invalid bearer token").rpc_code(),
            -32001
        );
        assert_eq!(AppError::internal("boom").rpc_code(), -32603);
    }

    #[test]
    fn detail_returns_the_original_message() {
        let error = AppError::not_found("tool_not_found", "Tool not found: frobnicate");
        assert_eq!(error.detail(), "Tool not found: frobnicate");
    }
}
