//! Capability invocation and result projection
//!
//! Bridges a resolved [`MethodCall`] to the RPC core and normalizes every
//! outcome into a JSON value through a single serialization path.

use rust_mcp_sdk::schema::{Prompt, Resource, Tool};
use serde::Serialize;
use serde_json::{json, Value};

use crate::core::McpCore;
use crate::errors::AppError;
use crate::mcp::router::MethodCall;

pub const DEFAULT_RESOURCE_MIME_TYPE: &str = "text/plain";

/// Catalog projections. Every optional core field is substituted with its
/// documented default so clients always see the full key set.
#[derive(Debug, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Serialize)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

#[derive(Debug, Serialize)]
pub struct PromptDescriptor {
    pub name: String,
    pub description: String,
    pub arguments: Value,
}

impl From<&Tool> for ToolDescriptor {
    fn from(tool: &Tool) -> Self {
        Self {
            name: tool.name.clone(),
            description: tool.description.clone().unwrap_or_default(),
            input_schema: serde_json::to_value(&tool.input_schema)
                .unwrap_or_else(|_| json!({})),
        }
    }
}

impl From<&Resource> for ResourceDescriptor {
    fn from(resource: &Resource) -> Self {
        Self {
            uri: resource.uri.clone(),
            name: resource.name.clone(),
            description: resource.description.clone().unwrap_or_default(),
            mime_type: resource
                .mime_type
                .clone()
                .unwrap_or_else(|| DEFAULT_RESOURCE_MIME_TYPE.to_string()),
        }
    }
}

impl From<&Prompt> for PromptDescriptor {
    fn from(prompt: &Prompt) -> Self {
        Self {
            name: prompt.name.clone(),
            description: prompt.description.clone().unwrap_or_default(),
            arguments: serde_json::to_value(&prompt.arguments).unwrap_or_else(|_| json!([])),
        }
    }
}

/// Invoke the resolved capability and normalize its result for JSON encoding.
pub async fn dispatch(core: &dyn McpCore, call: MethodCall) -> Result<Value, AppError> {
    match call {
        MethodCall::ListTools => {
            let tools = core.list_tools().await?;
            let tools: Vec<ToolDescriptor> = tools.iter().map(ToolDescriptor::from).collect();
            Ok(json!({ "tools": tools }))
        }
        MethodCall::ListResources => {
            let resources = core.list_resources().await?;
            let resources: Vec<ResourceDescriptor> =
                resources.iter().map(ResourceDescriptor::from).collect();
            Ok(json!({ "resources": resources }))
        }
        MethodCall::ListPrompts => {
            let prompts = core.list_prompts().await?;
            let prompts: Vec<PromptDescriptor> =
                prompts.iter().map(PromptDescriptor::from).collect();
            Ok(json!({ "prompts": prompts }))
        }
        MethodCall::CallTool { name, arguments }
        | MethodCall::CallToolLegacy { name, arguments } => {
            let result = core.call_tool(&name, arguments).await?;
            serialize_result(&result)
        }
        MethodCall::ReadResource { uri } => {
            let content = core.read_resource(&uri).await?;
            Ok(json!({
                "contents": [{
                    "uri": uri,
                    "mimeType": content
                        .mime_type
                        .unwrap_or_else(|| DEFAULT_RESOURCE_MIME_TYPE.to_string()),
                    "text": content.text.unwrap_or_default(),
                }]
            }))
        }
        MethodCall::GetPrompt { name, arguments } => {
            let result = core.get_prompt(&name, arguments).await?;
            serialize_result(&result)
        }
    }
}

fn serialize_result<T: Serialize>(result: &T) -> Result<Value, AppError> {
    serde_json::to_value(result)
        .map_err(|err| AppError::internal(format!("result serialization failed: {err}")))
}

#[cfg(test)]
mod tests {
    use rust_mcp_sdk::schema::{Prompt, Resource, Tool};
    use serde_json::json;

    use super::{PromptDescriptor, ResourceDescriptor, ToolDescriptor};

    #[test]
    fn tool_descriptor_defaults_optional_fields() {
        let tool: Tool = serde_json::from_value(json!({
            "name": "echo",
            "inputSchema": {"type": "object"}
        }))
        .expect("minimal tool json");

        let descriptor = ToolDescriptor::from(&tool);
        let rendered = serde_json::to_value(&descriptor).expect("serializable descriptor");
        assert_eq!(rendered["name"], "echo");
        assert_eq!(rendered["description"], "");
        assert_eq!(rendered["inputSchema"]["type"], "object");
    }

    #[test]
    fn resource_descriptor_defaults_mime_type() {
        let resource: Resource = serde_json::from_value(json!({
            "uri": "zammad://groups",
            "name": "Groups"
        }))
        .expect("minimal resource json");

        let descriptor = ResourceDescriptor::from(&resource);
        let rendered = serde_json::to_value(&descriptor).expect("serializable descriptor");
        assert_eq!(rendered["uri"], "zammad://groups");
        assert_eq!(rendered["name"], "Groups");
        assert_eq!(rendered["description"], "");
        assert_eq!(rendered["mimeType"], "text/plain");
    }

    #[test]
    fn prompt_descriptor_defaults_arguments() {
        let prompt: Prompt = serde_json::from_value(json!({
            "name": "summarize_ticket"
        }))
        .expect("minimal prompt json");

        let descriptor = PromptDescriptor::from(&prompt);
        let rendered = serde_json::to_value(&descriptor).expect("serializable descriptor");
        assert_eq!(rendered["name"], "summarize_ticket");
        assert_eq!(rendered["description"], "");
        assert_eq!(rendered["arguments"], json!([]));
    }
}
