//! Axum HTTP handlers for the gateway
//!
//! Provides the unary `/mcp/call` and streaming `/mcp/stream` endpoints plus
//! general metadata endpoints.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{sse::Sse, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::{AppError, ErrorResponse};
use crate::logging::redact_params;
use crate::mcp::envelope::{McpCallRequest, McpCallResponse};
use crate::mcp::router::parse_method;
use crate::mcp::stream::mcp_event_stream;
use crate::mcp::gateway;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub call_endpoint: &'static str,
    pub stream_endpoint: &'static str,
}

/// Static response; never touches the RPC core.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

pub async fn discovery() -> Json<DiscoveryResponse> {
    Json(DiscoveryResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        call_endpoint: "/mcp/call",
        stream_endpoint: "/mcp/stream",
    })
}

pub async fn mcp_call(State(state): State<AppState>, body: Bytes) -> Response {
    let Some(request) = parse_body(&body) else {
        return invalid_body_response();
    };

    let call = match parse_method(&request.method, request.params.as_ref()) {
        Ok(call) => call,
        // A missing tools/call name is the one routing failure that surfaces
        // as HTTP 400; every other failure stays inside the envelope.
        Err(
            error @ AppError::BadRequest {
                code: "missing_tool_name",
                ..
            },
        ) => return error.into_response(),
        Err(error) => {
            audit(&request, false);
            return (StatusCode::OK, Json(McpCallResponse::failure(&error))).into_response();
        }
    };

    let envelope = match gateway::dispatch(state.core.as_ref(), call).await {
        Ok(value) => {
            audit(&request, true);
            McpCallResponse::success(value)
        }
        Err(error) => {
            audit(&request, false);
            McpCallResponse::failure(&error)
        }
    };

    (StatusCode::OK, Json(envelope)).into_response()
}

pub async fn mcp_stream(State(state): State<AppState>, body: Bytes) -> Response {
    let Some(request) = parse_body(&body) else {
        return invalid_body_response();
    };

    audit(&request, true);

    let stream = mcp_event_stream(state.core.clone(), request);
    let mut response = Sse::new(stream).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    // Required so reverse proxies flush each event as it is produced.
    headers.insert(
        HeaderName::from_static("x-accel-buffering"),
        HeaderValue::from_static("no"),
    );
    response
}

fn parse_body(body: &Bytes) -> Option<McpCallRequest> {
    serde_json::from_slice(body).ok()
}

fn invalid_body_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            code: "invalid_body".to_string(),
            message: "request body must be a JSON object with a 'method' field".to_string(),
            details: serde_json::json!({}),
        }),
    )
        .into_response()
}

fn audit(request: &McpCallRequest, success: bool) {
    info!(
        method = %request.method,
        params = %redact_params(request.params.as_ref()),
        outcome = if success { "success" } else { "failure" },
        "mcp call audited"
    );
}
