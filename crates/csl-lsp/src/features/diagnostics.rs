//! Diagnostics in LSP shape: publish payloads and pull responses.

use crate::state::DocumentState;
use csl_span::{Diagnostic, WireRange};
use serde_json::{json, Value};

fn to_value(diagnostic: &Diagnostic) -> Value {
    json!({
        "range": WireRange::from(diagnostic.region),
        "severity": diagnostic.severity as i32,
        "source": "csl",
        "message": diagnostic.message,
    })
}

/// The diagnostics array for a document: errors (severity 1) followed by
/// warnings (severity 2), each in emission order.
pub fn collect(state: &DocumentState) -> Value {
    let items: Vec<Value> =
        state.errors.iter().chain(&state.warnings).map(to_value).collect();
    Value::Array(items)
}

/// `textDocument/diagnostic` pull response.
pub fn pull(state: &DocumentState) -> Value {
    json!({ "kind": "full", "items": collect(state) })
}

/// `textDocument/publishDiagnostics` params.
pub fn publish_params(uri: &str, state: Option<&DocumentState>) -> Value {
    let diagnostics = state.map(collect).unwrap_or_else(|| Value::Array(Vec::new()));
    json!({ "uri": uri, "diagnostics": diagnostics })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        let state =
            DocumentState::analyze("config A { x: string | \"dev\"; n: number = 0x_1; }".into());
        let items = collect(&state);
        let items = items.as_array().unwrap();
        assert!(items.iter().any(|d| d["severity"] == 1));
        assert!(items.iter().any(|d| d["severity"] == 2));
        assert!(items.iter().all(|d| d["source"] == "csl"));
    }

    #[test]
    fn test_publish_for_closed_document_is_empty() {
        let params = publish_params("file:///x.csl", None);
        assert_eq!(params["diagnostics"].as_array().unwrap().len(), 0);
    }
}
