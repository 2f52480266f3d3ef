//! Presentation helpers. Pure functions from results to text; the
//! `Model:`/`Status:` header pair at the top of every block is stable so
//! callers (and tests) can parse it back out.

use crate::types::{ComparisonReport, ModelRequest, ModelResult};

const SEPARATOR_LEN: usize = 60;

fn separator() -> String {
    "=".repeat(SEPARATOR_LEN)
}

fn header(result: &ModelResult) -> String {
    let status = if result.is_success() { "ok" } else { "error" };
    format!("Model: {}\nStatus: {}", result.model_id(), status)
}

/// Render one outcome: two header lines, then the generated text or the
/// failure message.
pub fn format_result(result: &ModelResult) -> String {
    let body = match result {
        ModelResult::Success { text, .. } => text,
        ModelResult::Failure { error, .. } => error,
    };

    format!("{}\n\n{}\n", header(result), body)
}

/// Render a single-query answer with the prompt and settings the caller
/// sent, the way the `query_model` tool reports it.
pub fn format_query(request: &ModelRequest, result: &ModelResult) -> String {
    format!(
        "{}\nPrompt: {}\n\n{}\n\nSettings: max_tokens={}\n",
        header(result),
        request.prompt,
        match result {
            ModelResult::Success { text, .. } => text.as_str(),
            ModelResult::Failure { error, .. } => error.as_str(),
        },
        request.max_tokens,
    )
}

/// Render a whole comparison: banner, prompt, then one separator-delimited
/// block per model in report order.
pub fn format_report(prompt: &str, report: &ComparisonReport) -> String {
    let mut out = format!("Model Comparison\nPrompt: {}\n", prompt);

    for result in report.results() {
        out.push('\n');
        out.push_str(&separator());
        out.push('\n');
        out.push_str(&format_result(result));
    }

    out
}

/// Parse the header pair at the start of a formatted block back into
/// `(model_id, is_success)`.
pub fn parse_result_header(block: &str) -> Option<(String, bool)> {
    let mut lines = block.lines();
    let model_id = lines.next()?.strip_prefix("Model: ")?.to_string();
    let status = lines.next()?.strip_prefix("Status: ")?;

    match status {
        "ok" => Some((model_id, true)),
        "error" => Some((model_id, false)),
        _ => None,
    }
}

/// Recover `(model_id, is_success)` per entry from a formatted report, in
/// report order. Only blocks anchored by a separator line count.
pub fn parse_report_headers(text: &str) -> Vec<(String, bool)> {
    let separator = separator();
    let lines: Vec<&str> = text.lines().collect();
    let mut entries = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if *line != separator {
            continue;
        }

        let rest = lines[idx + 1..].join("\n");
        if let Some(entry) = parse_result_header(&rest) {
            entries.push(entry);
        }
    }

    entries
}
