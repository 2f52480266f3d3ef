use thiserror::Error;

/// Remote error bodies are truncated to this many characters before they
/// land in a failure message.
pub const REMOTE_BODY_EXCERPT_LEN: usize = 200;

/// Everything that can go wrong between a [`crate::types::ModelRequest`]
/// and the remote API. All variants are folded into
/// [`crate::types::ModelResult::Failure`] at the gateway boundary; none
/// escape to the orchestrator.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("QUBRID_API_KEY is not configured")]
    MissingApiKey,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl GatewayError {
    pub fn remote(status: u16, body: &str) -> Self {
        let body = body.chars().take(REMOTE_BODY_EXCERPT_LEN).collect();
        GatewayError::Remote { status, body }
    }
}
