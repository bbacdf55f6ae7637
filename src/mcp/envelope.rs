//! Request and response envelopes for the unary endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct McpCallRequest {
    pub method: String,
    #[serde(default)]
    pub params: Option<Map<String, Value>>,
}

/// Exactly one of `result`/`error` is present, never both, never neither.
#[derive(Debug, Serialize)]
pub struct McpCallResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorBody>,
}

#[derive(Debug, Serialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
}

impl McpCallResponse {
    pub fn success(result: Value) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: &AppError) -> Self {
        Self {
            result: None,
            error: Some(RpcErrorBody {
                code: error.rpc_code(),
                message: error.detail().to_string(),
            }),
        }
    }
}
