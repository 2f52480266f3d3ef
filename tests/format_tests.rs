use crossquery::format::{
    format_query, format_report, format_result, parse_report_headers, parse_result_header,
};
use crossquery::types::{ComparisonReport, ModelRequest, ModelResult};

#[test]
fn format_result_renders_success_and_failure() {
    let success = format_result(&ModelResult::success("m", "the answer"));
    assert!(success.starts_with("Model: m\nStatus: ok\n\n"));
    assert!(success.contains("the answer"));

    let failure = format_result(&ModelResult::failure("m", "it broke"));
    assert!(failure.starts_with("Model: m\nStatus: error\n\n"));
    assert!(failure.contains("it broke"));
}

#[test]
fn format_query_includes_prompt_and_settings() {
    let request = ModelRequest::new("m", "why?").with_max_tokens(100);
    let text = format_query(&request, &ModelResult::success("m", "because"));

    assert!(text.contains("Model: m"));
    assert!(text.contains("Status: ok"));
    assert!(text.contains("Prompt: why?"));
    assert!(text.contains("because"));
    assert!(text.contains("Settings: max_tokens=100"));
}

#[test]
fn parse_result_header_recovers_id_and_tag() {
    let success = format_result(&ModelResult::success("model/a", "text"));
    assert_eq!(
        parse_result_header(&success),
        Some(("model/a".to_string(), true))
    );

    let failure = format_result(&ModelResult::failure("model/b", "err"));
    assert_eq!(
        parse_result_header(&failure),
        Some(("model/b".to_string(), false))
    );

    assert_eq!(parse_result_header("free-form text"), None);
}

#[test]
fn report_headers_round_trip_in_order() {
    let report = ComparisonReport::new(vec![
        ModelResult::success("a", "first answer"),
        ModelResult::failure("b", "network timeout"),
        ModelResult::success("c", "third answer"),
    ]);

    let text = format_report("the prompt", &report);
    assert!(text.contains("Model Comparison"));
    assert!(text.contains("Prompt: the prompt"));

    let headers = parse_report_headers(&text);
    assert_eq!(
        headers,
        vec![
            ("a".to_string(), true),
            ("b".to_string(), false),
            ("c".to_string(), true),
        ]
    );
}

#[test]
fn empty_report_formats_to_banner_only() {
    let text = format_report("p", &ComparisonReport::default());

    assert!(text.contains("Model Comparison"));
    assert!(parse_report_headers(&text).is_empty());
}

#[test]
fn formatting_is_deterministic() {
    let report = ComparisonReport::new(vec![
        ModelResult::success("a", "x"),
        ModelResult::failure("b", "y"),
    ]);

    assert_eq!(format_report("p", &report), format_report("p", &report));
}
