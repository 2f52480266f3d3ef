//! Smoke-test walkthrough of the whole surface: resources, the model
//! catalog, both tools, and the prompt templates. Runs against the real
//! API when `QUBRID_API_KEY` is set, otherwise against the in-process
//! mock server so it works offline.

use crossquery::config::GatewayConfig;
use crossquery::mock::{MockModelServer, MockResponse, MockRoute};
use crossquery::{catalog, new_client_with_config, prompts, tools};

use tracing_subscriber::EnvFilter;

fn banner(title: &str) {
    println!("{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let env_config = GatewayConfig::from_env();
    let (config, server) = if env_config.api_key.is_some() {
        println!("Using live endpoint: {}\n", env_config.base_url());
        (env_config, None)
    } else {
        println!("QUBRID_API_KEY not set, running against the mock server\n");
        let server = MockModelServer::start(vec![MockRoute::new(
            "/chat/completions",
            vec![
                MockResponse::completion("MCP is a protocol for wiring models to tools."),
                MockResponse::completion("Async lets one thread interleave many waits."),
                MockResponse::error(503, "model warming up"),
            ],
        )])
        .await?;
        let config = GatewayConfig::for_mock_server(&server)?.with_api_key("demo-key");
        (config, Some(server))
    };

    let client = new_client_with_config(config.clone());

    banner("Resources");
    for resource in catalog::list_resources() {
        println!("{} ({})", resource.name, resource.uri);
    }
    println!();

    banner("Model catalog");
    println!("{}\n", catalog::read_resource(catalog::MODELS_RESOURCE_URI, &config)?);

    banner("Tools");
    for tool in tools::list_tools() {
        println!("{}: {}", tool.name, tool.description);
    }
    println!();

    banner("query_model");
    let text = tools::call_tool(
        &client,
        tools::QUERY_TOOL,
        &serde_json::json!({
            "prompt": "What is MCP in one sentence?",
            "max_tokens": 100,
        }),
    )
    .await?;
    println!("{}", text);

    banner("compare_models");
    let text = tools::call_tool(
        &client,
        tools::COMPARE_TOOL,
        &serde_json::json!({
            "models": ["openai/gpt-oss-20b", "Qwen/Qwen2.5-72B-Instruct"],
            "prompt": "Explain async programming in one sentence",
        }),
    )
    .await?;
    println!("{}", text);

    banner("Prompt templates");
    for prompt in prompts::list_prompts() {
        println!("{}: {}", prompt.name, prompt.description);
    }

    if let Some(server) = server {
        server.shutdown().await;
    }

    Ok(())
}
