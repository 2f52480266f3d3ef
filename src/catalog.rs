//! The model catalog and the read-only resources built from it.

use serde::Serialize;
use thiserror::Error;

use crate::config::GatewayConfig;

pub const MODELS_RESOURCE_URI: &str = "qubrid://models/list";
pub const API_INFO_RESOURCE_URI: &str = "qubrid://info/api";

#[derive(Clone, Debug, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub description: &'static str,
}

pub const AVAILABLE_MODELS: [ModelInfo; 5] = [
    ModelInfo {
        id: "openai/gpt-oss-20b",
        description: "GPT OSS 20B model",
    },
    ModelInfo {
        id: "meta-llama/Llama-3.3-70B-Instruct",
        description: "Llama 3.3 70B",
    },
    ModelInfo {
        id: "Qwen/Qwen2.5-72B-Instruct",
        description: "Qwen 2.5 72B",
    },
    ModelInfo {
        id: "google/gemma-2-27b-it",
        description: "Gemma 2 27B",
    },
    ModelInfo {
        id: "mistralai/Mistral-7B-Instruct-v0.3",
        description: "Mistral 7B",
    },
];

#[derive(Clone, Debug, Serialize)]
pub struct Resource {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

pub fn list_resources() -> Vec<Resource> {
    vec![
        Resource {
            uri: MODELS_RESOURCE_URI,
            name: "Available Models",
            description: "List of all Qubrid models",
            mime_type: "application/json",
        },
        Resource {
            uri: API_INFO_RESOURCE_URI,
            name: "API Information",
            description: "API configuration",
            mime_type: "application/json",
        },
    ]
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("unknown resource URI: {0}")]
    UnknownUri(String),
}

pub fn read_resource(uri: &str, config: &GatewayConfig) -> Result<String, ResourceError> {
    match uri {
        MODELS_RESOURCE_URI => {
            let body = serde_json::json!({
                "total": AVAILABLE_MODELS.len(),
                "models": AVAILABLE_MODELS,
            });
            Ok(serde_json::to_string_pretty(&body).expect("resource json serializes"))
        }
        API_INFO_RESOURCE_URI => {
            let body = serde_json::json!({
                "base_url": config.base_url(),
                "api_key_configured": config.api_key.is_some(),
                "status": if config.api_key.is_some() { "ready" } else { "missing API key" },
            });
            Ok(serde_json::to_string_pretty(&body).expect("resource json serializes"))
        }
        other => Err(ResourceError::UnknownUri(other.to_string())),
    }
}
