use crate::config::{EndpointUrl, GatewayConfig};
use crate::error::GatewayError;
use crate::types::{ModelRequest, ModelResult};

pub const COMPLETIONS_PATH: &str = "/chat/completions";

const TEMPERATURE: f64 = 0.7;

/// Anything that can answer a single model query. The orchestrator and
/// tool layer only see this trait, so tests can swap in scripted fakes.
#[async_trait::async_trait]
pub trait QueryModel: Send + Sync {
    /// Always completes with a [`ModelResult`]; failures of any kind are
    /// folded into the `Failure` variant rather than surfaced as errors.
    async fn query(&self, request: &ModelRequest) -> ModelResult;
}

/// HTTP gateway to the Qubrid chat-completions endpoint. One shared
/// `reqwest::Client` per gateway value; no retries, no caching.
pub struct QubridClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    endpoint: EndpointUrl,
}

impl QubridClient {
    pub fn new(config: GatewayConfig) -> Self {
        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if config.disable_proxy {
            builder = builder.no_proxy();
        }

        Self {
            http_client: builder.build().expect("reqwest client"),
            api_key: config.api_key,
            endpoint: config.endpoint.resolve(),
        }
    }

    pub fn completions_url(&self) -> String {
        format!(
            "{}{}{}",
            self.endpoint.origin(),
            self.endpoint.path_prefix,
            COMPLETIONS_PATH
        )
    }

    /// Build the outbound request for the reqwest client.
    ///
    /// # Errors
    /// Returns [`GatewayError::MissingApiKey`] when no credential was
    /// configured; no unauthenticated call is ever attempted.
    pub fn build_request(
        &self,
        request: &ModelRequest,
    ) -> Result<reqwest::RequestBuilder, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or(GatewayError::MissingApiKey)?;

        let body = serde_json::json!({
            "model": request.model_id,
            "messages": [{ "role": "user", "content": request.prompt }],
            "max_tokens": request.max_tokens,
            "temperature": TEMPERATURE,
            "stream": false,
        });

        Ok(self
            .http_client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body))
    }

    /// Pull the generated text out of a response body. Most deployments
    /// answer in the OpenAI `choices` shape, but some return a flat
    /// `response` or `content` field instead.
    pub fn read_json_response(response_json: &serde_json::Value) -> Result<String, GatewayError> {
        if let Some(text) = response_json
            .get("choices")
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("message"))
            .and_then(|v| v.get("content"))
            .and_then(|v| v.as_str())
        {
            return Ok(text.to_string());
        }

        for field in ["response", "content"] {
            if let Some(text) = response_json.get(field).and_then(|v| v.as_str()) {
                return Ok(text.to_string());
            }
        }

        Err(GatewayError::Shape(
            "missing 'choices[0].message.content'".to_string(),
        ))
    }

    async fn query_inner(&self, request: &ModelRequest) -> Result<String, GatewayError> {
        if request.model_id.is_empty() {
            return Err(GatewayError::InvalidRequest("model_id is empty".to_string()));
        }
        if request.prompt.is_empty() {
            return Err(GatewayError::InvalidRequest("prompt is empty".to_string()));
        }

        let response = self.build_request(request)?.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GatewayError::remote(status.as_u16(), &body));
        }

        let response_json: serde_json::Value = serde_json::from_str(&body)
            .map_err(|err| GatewayError::Shape(format!("response is not JSON: {}", err)))?;

        Self::read_json_response(&response_json)
    }
}

#[async_trait::async_trait]
impl QueryModel for QubridClient {
    async fn query(&self, request: &ModelRequest) -> ModelResult {
        tracing::debug!(model = %request.model_id, "querying model");

        match self.query_inner(request).await {
            Ok(text) => {
                tracing::debug!(model = %request.model_id, "model responded");
                ModelResult::success(&request.model_id, text)
            }
            Err(err) => {
                tracing::warn!(model = %request.model_id, error = %err, "model query failed");
                ModelResult::failure(&request.model_id, err.to_string())
            }
        }
    }
}
