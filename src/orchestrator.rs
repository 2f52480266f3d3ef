use futures::future::join_all;

use crate::gateway::QueryModel;
use crate::types::{ComparisonReport, ModelRequest};

/// Fan out one gateway query per model, wait for every outcome, and
/// collect them in the caller's input order.
///
/// There is no short-circuit in either direction: a failing model only
/// turns its own entry into a `Failure`, and `join_all` preserves index
/// order regardless of which response lands first. An empty `models` list
/// produces an empty report without touching the gateway; duplicate ids
/// are each queried independently.
pub async fn compare<G>(gateway: &G, models: &[String], prompt: &str) -> ComparisonReport
where
    G: QueryModel + ?Sized,
{
    tracing::debug!(models = models.len(), "fanning out comparison");

    let requests: Vec<ModelRequest> = models
        .iter()
        .map(|model| ModelRequest::new(model, prompt))
        .collect();

    let results = join_all(requests.iter().map(|request| gateway.query(request))).await;

    ComparisonReport::new(results)
}
