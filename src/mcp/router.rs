//! Method-string routing for the gateway
//!
//! Parses the inbound method string exactly once into a tagged [`MethodCall`];
//! endpoints then match exhaustively instead of re-stripping prefixes.

use serde_json::{Map, Value};

use crate::errors::AppError;

/// A resolved capability invocation. `CallToolLegacy` is the deprecated
/// `tools/call/<name>` form; only the unary endpoint accepts it.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodCall {
    ListTools,
    ListResources,
    ListPrompts,
    CallTool {
        name: String,
        arguments: Map<String, Value>,
    },
    CallToolLegacy {
        name: String,
        arguments: Map<String, Value>,
    },
    ReadResource {
        uri: String,
    },
    GetPrompt {
        name: String,
        arguments: Map<String, Value>,
    },
}

const READ_RESOURCE_PREFIX: &str = "resources/read/";
const GET_PROMPT_PREFIX: &str = "prompts/get/";
const CALL_TOOL_PREFIX: &str = "tools/call/";

/// Resolution order: literals first, then prefixes in a fixed order; the
/// first match wins. The remainder after a prefix is taken verbatim — no
/// percent-decoding, and query strings stay part of the remainder.
pub fn parse_method(
    method: &str,
    params: Option<&Map<String, Value>>,
) -> Result<MethodCall, AppError> {
    match method {
        "tools/list" => return Ok(MethodCall::ListTools),
        "resources/list" => return Ok(MethodCall::ListResources),
        "prompts/list" => return Ok(MethodCall::ListPrompts),
        "tools/call" => return call_tool_from_params(params),
        _ => {}
    }

    if let Some(uri) = method.strip_prefix(READ_RESOURCE_PREFIX) {
        return Ok(MethodCall::ReadResource {
            uri: uri.to_string(),
        });
    }

    if let Some(name) = method.strip_prefix(GET_PROMPT_PREFIX) {
        return Ok(MethodCall::GetPrompt {
            name: name.to_string(),
            arguments: params.cloned().unwrap_or_default(),
        });
    }

    if let Some(name) = method.strip_prefix(CALL_TOOL_PREFIX) {
        return Ok(MethodCall::CallToolLegacy {
            name: name.to_string(),
            arguments: params.cloned().unwrap_or_default(),
        });
    }

    Err(AppError::not_found(
        "method_not_found",
        format!("Method not found: {method}"),
    ))
}

fn call_tool_from_params(params: Option<&Map<String, Value>>) -> Result<MethodCall, AppError> {
    let name = params
        .and_then(|map| map.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            AppError::bad_request(
                "missing_tool_name",
                "Missing 'name' parameter in tools/call",
            )
        })?;

    let arguments = match params.and_then(|map| map.get("arguments")) {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            return Err(AppError::bad_request(
                "invalid_arguments",
                "tools/call 'arguments' must be an object",
            ))
        }
    };

    Ok(MethodCall::CallTool { name, arguments })
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::{parse_method, MethodCall};
    use crate::errors::AppError;

    fn params(pairs: &[(&str, serde_json::Value)]) -> Map<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn resolves_list_literals() {
        assert_eq!(
            parse_method("tools/list", None).expect("tools/list"),
            MethodCall::ListTools
        );
        assert_eq!(
            parse_method("resources/list", None).expect("resources/list"),
            MethodCall::ListResources
        );
        assert_eq!(
            parse_method("prompts/list", None).expect("prompts/list"),
            MethodCall::ListPrompts
        );
    }

    #[test]
    fn tools_call_requires_name() {
        let error = parse_method("tools/call", Some(&Map::new()))
            .expect_err("missing name must fail");
        assert!(matches!(error, AppError::BadRequest { .. }));

        let error = parse_method("tools/call", None).expect_err("absent params must fail");
        assert!(matches!(error, AppError::BadRequest { .. }));
    }

    #[test]
    fn tools_call_defaults_arguments() {
        let call = parse_method(
            "tools/call",
            Some(&params(&[("name", json!("search_tickets"))])),
        )
        .expect("valid tools/call");

        match call {
            MethodCall::CallTool { name, arguments } => {
                assert_eq!(name, "search_tickets");
                assert!(arguments.is_empty());
            }
            other => panic!("expected CallTool, got {other:?}"),
        }
    }

    #[test]
    fn tools_call_rejects_non_object_arguments() {
        let error = parse_method(
            "tools/call",
            Some(&params(&[
                ("name", json!("search_tickets")),
                ("arguments", json!("not-an-object")),
            ])),
        )
        .expect_err("non-object arguments must fail");
        assert!(matches!(error, AppError::BadRequest { .. }));
    }

    #[test]
    fn resource_read_takes_remainder_verbatim() {
        let call = parse_method("resources/read/zammad://ticket/42?x=%20y", None)
            .expect("valid resources/read");
        assert_eq!(
            call,
            MethodCall::ReadResource {
                uri: "zammad://ticket/42?x=%20y".to_string()
            }
        );
    }

    #[test]
    fn prompt_get_passes_params_through() {
        let call = parse_method(
            "prompts/get/summarize_ticket",
            Some(&params(&[("ticket_id", json!(42))])),
        )
        .expect("valid prompts/get");

        match call {
            MethodCall::GetPrompt { name, arguments } => {
                assert_eq!(name, "summarize_ticket");
                assert_eq!(arguments["ticket_id"], json!(42));
            }
            other => panic!("expected GetPrompt, got {other:?}"),
        }
    }

    #[test]
    fn legacy_tool_call_passes_params_as_arguments() {
        let call = parse_method(
            "tools/call/get_ticket",
            Some(&params(&[("ticket_id", json!(42))])),
        )
        .expect("valid legacy tools/call");

        match call {
            MethodCall::CallToolLegacy { name, arguments } => {
                assert_eq!(name, "get_ticket");
                assert_eq!(arguments["ticket_id"], json!(42));
            }
            other => panic!("expected CallToolLegacy, got {other:?}"),
        }
    }

    #[test]
    fn first_prefix_match_wins() {
        // A method that embeds another prefix in its remainder still resolves
        // against the earlier table entry.
        let call =
            parse_method("resources/read/prompts/get/x", None).expect("valid resources/read");
        assert_eq!(
            call,
            MethodCall::ReadResource {
                uri: "prompts/get/x".to_string()
            }
        );
    }

    #[test]
    fn unknown_method_is_not_found() {
        let error = parse_method("unknown/x", None).expect_err("unknown method must fail");
        assert!(matches!(error, AppError::NotFound { .. }));
        assert!(error.detail().to_lowercase().contains("not found"));
    }
}
