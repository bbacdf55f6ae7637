use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use serde_json::{Map, Value};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started_at = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis();

    info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = elapsed_ms,
        "request summary"
    );

    if status.as_u16() == 401 {
        warn!(method = %method, path = %path, "authentication failure");
    }

    response
}

/// Audit copy of request params with secret-bearing values masked.
pub fn redact_params(params: Option<&Map<String, Value>>) -> Value {
    params
        .map(|map| redact_value(&Value::Object(map.clone())))
        .unwrap_or(Value::Null)
}

fn redact_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| {
                    if is_sensitive_key(key) {
                        (key.clone(), Value::String("[REDACTED]".to_string()))
                    } else {
                        (key.clone(), redact_value(item))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_value).collect()),
        _ => value.clone(),
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let normalized = key.trim().to_ascii_lowercase();
    normalized.contains("token")
        || normalized.contains("secret")
        || normalized.contains("password")
        || normalized.contains("credential")
        || normalized.contains("api_key")
        || normalized == "authorization"
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::redact_params;

    #[test]
    fn redacts_sensitive_fields_in_params() {
        let params = json!({
            "name": "search_tickets",
            "arguments": {
                "query": "printer broken",
                "api_key": "should-not-appear",
                "nested": {
                    "password": "should-not-appear"
                }
            }
        });

        let redacted = redact_params(params.as_object());

        assert_eq!(redacted["name"], json!("search_tickets"));
        assert_eq!(redacted["arguments"]["query"], json!("printer broken"));
        assert_eq!(redacted["arguments"]["api_key"], json!("[REDACTED]"));
        assert_eq!(
            redacted["arguments"]["nested"]["password"],
            json!("[REDACTED]")
        );
    }

    #[test]
    fn absent_params_redact_to_null() {
        assert_eq!(redact_params(None), serde_json::Value::Null);
    }
}
