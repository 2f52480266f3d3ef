use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_TOKENS: u32 = 256;

/// One query to one model. Immutable once built; the gateway makes exactly
/// one outbound call per instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRequest {
    pub model_id: String,
    pub prompt: String,
    pub max_tokens: u32,
}

impl ModelRequest {
    pub fn new(model_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            prompt: prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// The outcome of one query. Failures are ordinary values here, not
/// errors: the orchestrator's fan-in treats both variants identically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ModelResult {
    Success { model_id: String, text: String },
    Failure { model_id: String, error: String },
}

impl ModelResult {
    pub fn success(model_id: impl Into<String>, text: impl Into<String>) -> Self {
        ModelResult::Success {
            model_id: model_id.into(),
            text: text.into(),
        }
    }

    pub fn failure(model_id: impl Into<String>, error: impl Into<String>) -> Self {
        ModelResult::Failure {
            model_id: model_id.into(),
            error: error.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        match self {
            ModelResult::Success { model_id, .. } => model_id,
            ModelResult::Failure { model_id, .. } => model_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ModelResult::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ModelResult::Success { text, .. } => Some(text),
            ModelResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ModelResult::Success { .. } => None,
            ModelResult::Failure { error, .. } => Some(error),
        }
    }
}

/// Ordered per-model outcomes from one comparison. Always holds exactly
/// one entry per requested model, in the caller's input order; completion
/// timing and individual failures never reorder or shrink it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    results: Vec<ModelResult>,
}

impl ComparisonReport {
    pub fn new(results: Vec<ModelResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results(&self) -> &[ModelResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<ModelResult> {
        self.results
    }
}
