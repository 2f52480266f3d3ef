#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crossquery::gateway::QueryModel;
use crossquery::types::{ModelRequest, ModelResult};

pub fn completion_json(text: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            {
                "message": {
                    "content": text,
                }
            }
        ]
    })
}

pub fn request_body_json(request: &reqwest::Request) -> serde_json::Value {
    let bytes = request
        .body()
        .and_then(|body| body.as_bytes())
        .expect("request body should be JSON bytes");

    serde_json::from_slice(bytes).expect("request body should deserialize")
}

#[derive(Clone)]
struct Outcome {
    reply: Result<String, String>,
    delay: Option<Duration>,
}

/// Scripted gateway for orchestrator and tool tests: per-model outcome,
/// optional per-model delay, and a call counter.
pub struct FakeGateway {
    outcomes: HashMap<String, Outcome>,
    calls: AtomicUsize,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn succeed(mut self, model_id: &str, text: &str) -> Self {
        self.outcomes.insert(
            model_id.to_string(),
            Outcome {
                reply: Ok(text.to_string()),
                delay: None,
            },
        );
        self
    }

    pub fn fail(mut self, model_id: &str, error: &str) -> Self {
        self.outcomes.insert(
            model_id.to_string(),
            Outcome {
                reply: Err(error.to_string()),
                delay: None,
            },
        );
        self
    }

    pub fn delay(mut self, model_id: &str, delay: Duration) -> Self {
        if let Some(outcome) = self.outcomes.get_mut(model_id) {
            outcome.delay = Some(delay);
        }
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl QueryModel for FakeGateway {
    async fn query(&self, request: &ModelRequest) -> ModelResult {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let outcome = match self.outcomes.get(&request.model_id) {
            Some(outcome) => outcome.clone(),
            None => return ModelResult::failure(&request.model_id, "no scripted outcome"),
        };

        if let Some(delay) = outcome.delay {
            tokio::time::sleep(delay).await;
        }

        match outcome.reply {
            Ok(text) => ModelResult::success(&request.model_id, text),
            Err(error) => ModelResult::failure(&request.model_id, error),
        }
    }
}
