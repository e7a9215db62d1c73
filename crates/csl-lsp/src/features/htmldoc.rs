//! The custom `csl/generateHtmlDoc` request.

use crate::state::DocumentState;
use serde_json::{Map, Value};

/// Runs the HTML generator for a document.
///
/// With `reuse_existing` and a cache hit the cached schemas are used
/// directly; otherwise the provided text (falling back to the cached
/// text) is lexed and parsed on the spot. Returns the path → content map
/// as a JSON object.
pub fn generate(
    cached: Option<&DocumentState>,
    text: Option<&str>,
    reuse_existing: bool,
) -> Value {
    let fresh;
    let document = if reuse_existing && cached.is_some() {
        cached.map(|state| &state.document)
    } else if let Some(text) = text {
        fresh = DocumentState::analyze(text.to_string());
        Some(&fresh.document)
    } else {
        cached.map(|state| &state.document)
    };

    let mut object = Map::new();
    if let Some(document) = document {
        for (path, content) in csl_htmldoc::generate(document) {
            object.insert(path, Value::String(content));
        }
    }
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_from_cached_state() {
        let state = DocumentState::analyze("config App { x: string; }".to_string());
        let value = generate(Some(&state), None, true);
        let object = value.as_object().unwrap();
        assert!(object.contains_key("index.html"));
        assert!(object.contains_key("schema-app.html"));
        assert!(object.contains_key("site.css"));
        assert!(object.contains_key("site.js"));
    }

    #[test]
    fn test_generate_from_provided_text() {
        let value = generate(None, Some("config Fresh { y: number; }"), false);
        let object = value.as_object().unwrap();
        assert!(object.contains_key("schema-fresh.html"));
    }

    #[test]
    fn test_generate_without_any_source_is_empty() {
        let value = generate(None, None, false);
        assert_eq!(value.as_object().unwrap().len(), 0);
    }
}
