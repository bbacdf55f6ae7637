//! SSE session state machine for the streaming endpoint
//!
//! Event order per stream: exactly one `connected` first, at most one
//! `result`, exactly one terminal event (`done` on success, `error` on
//! failure) and nothing after it. The generator is dropped when the client
//! disconnects, so no event is produced past a detected disconnect.

use std::convert::Infallible;
use std::sync::Arc;

use async_stream::stream;
use axum::response::sse::Event;
use futures::Stream;
use serde_json::json;
use uuid::Uuid;

use crate::core::McpCore;
use crate::errors::AppError;
use crate::mcp::envelope::McpCallRequest;
use crate::mcp::gateway;
use crate::mcp::router::{parse_method, MethodCall};

pub fn mcp_event_stream(
    core: Arc<dyn McpCore>,
    request: McpCallRequest,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream! {
        let session_id = Uuid::new_v4().to_string();
        yield Ok(event("connected", json!({ "session_id": session_id })));

        let call = match parse_method(&request.method, request.params.as_ref()) {
            // The legacy tools/call/<name> form is unary-only.
            Ok(MethodCall::CallToolLegacy { .. }) => {
                let error = AppError::not_found(
                    "method_not_found",
                    format!("Method not found: {}", request.method),
                );
                yield Ok(error_event(&error));
                return;
            }
            Ok(call) => call,
            Err(AppError::BadRequest { message, .. }) => {
                yield Ok(event("error", json!({ "error": message })));
                return;
            }
            Err(error) => {
                yield Ok(error_event(&error));
                return;
            }
        };

        match gateway::dispatch(core.as_ref(), call).await {
            Ok(value) => {
                yield Ok(event("result", value));
                yield Ok(event("done", json!({ "status": "completed" })));
            }
            Err(error) => {
                yield Ok(error_event(&error));
            }
        }
    }
}

fn event(kind: &str, data: serde_json::Value) -> Event {
    Event::default().event(kind).data(data.to_string())
}

fn error_event(error: &AppError) -> Event {
    event(
        "error",
        json!({
            "error": {
                "code": error.rpc_code(),
                "message": error.detail(),
            }
        }),
    )
}
