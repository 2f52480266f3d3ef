//! The inbound tool surface: descriptors with JSON-Schema inputs, and a
//! dispatcher a protocol server would call. Individual model failures come
//! back inside the formatted text, never as `Err`.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::format;
use crate::gateway::QueryModel;
use crate::orchestrator;
use crate::types::{ModelRequest, DEFAULT_MAX_TOKENS};

pub const QUERY_TOOL: &str = "query_model";
pub const COMPARE_TOOL: &str = "compare_models";

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b";

#[derive(Clone, Debug, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

pub fn list_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: QUERY_TOOL,
            description: "Query a Qubrid model with a prompt",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "model": {
                        "type": "string",
                        "description": "Model ID",
                        "default": DEFAULT_MODEL,
                    },
                    "prompt": {
                        "type": "string",
                        "description": "Prompt",
                    },
                    "max_tokens": {
                        "type": "integer",
                        "default": DEFAULT_MAX_TOKENS,
                    },
                },
                "required": ["prompt"],
            }),
        },
        ToolDescriptor {
            name: COMPARE_TOOL,
            description: "Compare multiple models on one prompt",
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "models": {
                        "type": "array",
                        "items": { "type": "string" },
                    },
                    "prompt": {
                        "type": "string",
                    },
                },
                "required": ["models", "prompt"],
            }),
        },
    ]
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),
    #[error("argument {name} should be {expected}")]
    InvalidArgument {
        name: &'static str,
        expected: &'static str,
    },
}

/// Dispatch a tool invocation against a gateway and return formatted text.
pub async fn call_tool<G>(gateway: &G, name: &str, arguments: &Value) -> Result<String, ToolError>
where
    G: QueryModel + ?Sized,
{
    tracing::debug!(tool = name, "dispatching tool call");

    match name {
        QUERY_TOOL => {
            let prompt = required_str(arguments, "prompt")?;
            let model = match arguments.get("model") {
                None | Some(Value::Null) => DEFAULT_MODEL,
                Some(value) => value.as_str().ok_or(ToolError::InvalidArgument {
                    name: "model",
                    expected: "a string",
                })?,
            };
            let max_tokens = match arguments.get("max_tokens") {
                None | Some(Value::Null) => DEFAULT_MAX_TOKENS,
                Some(value) => value
                    .as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or(ToolError::InvalidArgument {
                        name: "max_tokens",
                        expected: "an unsigned integer",
                    })?,
            };

            let request = ModelRequest::new(model, prompt).with_max_tokens(max_tokens);
            let result = gateway.query(&request).await;

            Ok(format::format_query(&request, &result))
        }
        COMPARE_TOOL => {
            let prompt = required_str(arguments, "prompt")?;
            let models = arguments
                .get("models")
                .and_then(|value| value.as_array())
                .ok_or(ToolError::MissingArgument("models"))?;
            let models: Vec<String> = models
                .iter()
                .map(|value| {
                    value
                        .as_str()
                        .map(str::to_string)
                        .ok_or(ToolError::InvalidArgument {
                            name: "models",
                            expected: "an array of strings",
                        })
                })
                .collect::<Result<_, _>>()?;

            let report = orchestrator::compare(gateway, &models, prompt).await;

            Ok(format::format_report(prompt, &report))
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}

fn required_str<'a>(arguments: &'a Value, name: &'static str) -> Result<&'a str, ToolError> {
    arguments
        .get(name)
        .and_then(|value| value.as_str())
        .ok_or(ToolError::MissingArgument(name))
}
