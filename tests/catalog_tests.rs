use crossquery::catalog::{
    list_resources, read_resource, ResourceError, API_INFO_RESOURCE_URI, AVAILABLE_MODELS,
    MODELS_RESOURCE_URI,
};
use crossquery::config::GatewayConfig;
use crossquery::prompts::{list_prompts, render_prompt, PromptError};
use crossquery::tools::DEFAULT_MODEL;

#[test]
fn resources_are_listed_with_uris() {
    let resources = list_resources();

    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].uri, MODELS_RESOURCE_URI);
    assert_eq!(resources[1].uri, API_INFO_RESOURCE_URI);
    assert!(resources.iter().all(|r| r.mime_type == "application/json"));
}

#[test]
fn models_resource_lists_the_whole_catalog() {
    let body = read_resource(MODELS_RESOURCE_URI, &GatewayConfig::default())
        .expect("models resource reads");
    let json: serde_json::Value = serde_json::from_str(&body).expect("resource is json");

    assert_eq!(json["total"], AVAILABLE_MODELS.len());
    assert_eq!(json["models"][0]["id"], DEFAULT_MODEL);
    assert_eq!(
        json["models"].as_array().map(Vec::len),
        Some(AVAILABLE_MODELS.len())
    );
}

#[test]
fn api_info_reflects_key_presence() {
    let without_key = read_resource(API_INFO_RESOURCE_URI, &GatewayConfig::default())
        .expect("api info reads");
    let json: serde_json::Value = serde_json::from_str(&without_key).expect("resource is json");
    assert_eq!(json["api_key_configured"], false);
    assert_eq!(json["base_url"], "https://platform.qubrid.com/api/v1/qubridai");
    assert!(json["status"].as_str().unwrap().contains("missing"));

    let with_key = read_resource(
        API_INFO_RESOURCE_URI,
        &GatewayConfig::default().with_api_key("k"),
    )
    .expect("api info reads");
    let json: serde_json::Value = serde_json::from_str(&with_key).expect("resource is json");
    assert_eq!(json["api_key_configured"], true);
    assert_eq!(json["status"], "ready");
}

#[test]
fn unknown_resource_uri_is_an_error() {
    let err = read_resource("qubrid://nope", &GatewayConfig::default())
        .expect_err("unknown uri should error");

    assert!(matches!(err, ResourceError::UnknownUri(uri) if uri == "qubrid://nope"));
}

#[test]
fn prompt_templates_are_listed() {
    let prompts = list_prompts();

    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0].name, "test_model");
    assert_eq!(prompts[1].name, "explain_concept");
    assert!(prompts.iter().all(|p| p.arguments[0].required));
}

#[test]
fn render_prompt_fills_in_the_argument() {
    let rendered = render_prompt("test_model", &serde_json::json!({ "topic": "ownership" }))
        .expect("template renders");
    assert_eq!(rendered.description, "Test about ownership");
    assert_eq!(rendered.message, "Explain ownership in 2-3 sentences.");

    let rendered = render_prompt("explain_concept", &serde_json::json!({ "concept": "borrowing" }))
        .expect("template renders");
    assert_eq!(rendered.message, "Explain borrowing simply with an example.");
}

#[test]
fn render_prompt_rejects_missing_or_unknown() {
    let err = render_prompt("test_model", &serde_json::json!({}))
        .expect_err("missing argument should error");
    assert!(matches!(err, PromptError::MissingArgument("topic")));

    let err = render_prompt("nope", &serde_json::json!({ "topic": "t" }))
        .expect_err("unknown prompt should error");
    assert!(matches!(err, PromptError::UnknownPrompt(name) if name == "nope"));
}
