//! Prompt templates: named, parameterized user messages a caller can
//! render and feed back into the query tools.

use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Debug, Serialize)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: &'static [PromptArgument],
}

pub const TEST_MODEL_PROMPT: &str = "test_model";
pub const EXPLAIN_CONCEPT_PROMPT: &str = "explain_concept";

pub fn list_prompts() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            name: TEST_MODEL_PROMPT,
            description: "Quick test prompt",
            arguments: &[PromptArgument {
                name: "topic",
                description: "Topic",
                required: true,
            }],
        },
        PromptTemplate {
            name: EXPLAIN_CONCEPT_PROMPT,
            description: "Explain a concept",
            arguments: &[PromptArgument {
                name: "concept",
                description: "Concept",
                required: true,
            }],
        },
    ]
}

/// A rendered template: a description plus the single user-role message
/// to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub description: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("unknown prompt: {0}")]
    UnknownPrompt(String),
    #[error("missing prompt argument: {0}")]
    MissingArgument(&'static str),
}

pub fn render_prompt(name: &str, arguments: &serde_json::Value) -> Result<RenderedPrompt, PromptError> {
    match name {
        TEST_MODEL_PROMPT => {
            let topic = required_arg(arguments, "topic")?;
            Ok(RenderedPrompt {
                description: format!("Test about {}", topic),
                message: format!("Explain {} in 2-3 sentences.", topic),
            })
        }
        EXPLAIN_CONCEPT_PROMPT => {
            let concept = required_arg(arguments, "concept")?;
            Ok(RenderedPrompt {
                description: format!("Explain {}", concept),
                message: format!("Explain {} simply with an example.", concept),
            })
        }
        other => Err(PromptError::UnknownPrompt(other.to_string())),
    }
}

fn required_arg<'a>(
    arguments: &'a serde_json::Value,
    name: &'static str,
) -> Result<&'a str, PromptError> {
    arguments
        .get(name)
        .and_then(|value| value.as_str())
        .ok_or(PromptError::MissingArgument(name))
}
