//! Client library for the Qubrid chat-completions API: a single-query
//! gateway, a fan-out comparison orchestrator, and the tool/resource/prompt
//! surface a protocol server would mount on top of them.

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod gateway;
pub mod mock;
pub mod orchestrator;
pub mod prompts;
pub mod tools;
pub mod types;

use config::GatewayConfig;
use gateway::QubridClient;

/// Create a client from the process environment (`QUBRID_API_KEY`,
/// `QUBRID_BASE_URL`). A missing key is not an error here; queries made
/// with it fail individually instead.
pub fn new_client() -> QubridClient {
    QubridClient::new(GatewayConfig::from_env())
}

/// Create a client from an explicit configuration value, e.g. one pointed
/// at a mock server with an injected key.
pub fn new_client_with_config(config: GatewayConfig) -> QubridClient {
    QubridClient::new(config)
}
