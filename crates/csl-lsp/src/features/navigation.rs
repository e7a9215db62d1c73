//! Definition, references, and rename.

use crate::features::{definition_at, definition_name_region, quote_if_needed};
use crate::state::DocumentState;
use csl_ast::DefinitionRef;
use csl_span::WireRange;
use serde_json::{json, Value};

/// Every token index mapped to `definition`, in stream order.
fn occurrences(state: &DocumentState, definition: DefinitionRef) -> Vec<usize> {
    let mut indices: Vec<usize> = state
        .definitions
        .iter()
        .filter(|(_, d)| **d == definition)
        .map(|(i, _)| *i)
        .collect();
    indices.sort_unstable();
    indices
}

/// `textDocument/definition`: the definition's name region.
pub fn definition(state: &DocumentState, params: &Value, uri: &str) -> Value {
    let Some(target) = definition_at(state, params) else { return Value::Null };
    let Some(region) = definition_name_region(state, target) else { return Value::Null };
    json!({ "uri": uri, "range": WireRange::from(region) })
}

/// `textDocument/references`: all occurrences, optionally including the
/// declaration itself.
pub fn references(state: &DocumentState, params: &Value, uri: &str) -> Value {
    let Some(target) = definition_at(state, params) else { return Value::Array(Vec::new()) };
    let include_declaration = params
        .get("context")
        .and_then(|c| c.get("includeDeclaration"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let declaration_region = definition_name_region(state, target);

    let locations: Vec<Value> = occurrences(state, target)
        .into_iter()
        .filter(|index| {
            include_declaration
                || declaration_region != Some(state.tokens[*index].region)
        })
        .map(|index| {
            json!({ "uri": uri, "range": WireRange::from(state.tokens[index].region) })
        })
        .collect();
    Value::Array(locations)
}

/// `textDocument/rename`: a workspace edit replacing every occurrence,
/// backtick-quoting the new name when it is not a bare identifier.
pub fn rename(state: &DocumentState, params: &Value, uri: &str) -> Value {
    let Some(target) = definition_at(state, params) else { return Value::Null };
    let Some(new_name) = params.get("newName").and_then(Value::as_str) else {
        return Value::Null;
    };
    let replacement = quote_if_needed(new_name);

    let edits: Vec<Value> = occurrences(state, target)
        .into_iter()
        .map(|index| {
            json!({
                "range": WireRange::from(state.tokens[index].region),
                "newText": replacement,
            })
        })
        .collect();
    let mut changes = serde_json::Map::new();
    changes.insert(uri.to_string(), Value::Array(edits));
    json!({ "changes": changes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "config A {\n  db: { ssl: boolean; };\n  insecure: boolean;\n  constraints { conflicts db.ssl with insecure; }\n}";

    fn params(line: u32, character: u32) -> Value {
        json!({ "position": { "line": line, "character": character } })
    }

    #[test]
    fn test_definition_from_constraint_usage() {
        let state = DocumentState::analyze(SOURCE.to_string());
        // `db` usage inside the constraint on line 3.
        let value = definition(&state, &params(3, 26), "file:///a.csl");
        assert_eq!(value["range"]["start"]["line"], 1);
        assert_eq!(value["range"]["start"]["character"], 2);
    }

    #[test]
    fn test_references_with_and_without_declaration() {
        let state = DocumentState::analyze(SOURCE.to_string());
        let with_declaration = references(
            &state,
            &json!({
                "position": { "line": 3, "character": 26 },
                "context": { "includeDeclaration": true },
            }),
            "file:///a.csl",
        );
        assert_eq!(with_declaration.as_array().unwrap().len(), 2);

        let without = references(&state, &params(3, 26), "file:///a.csl");
        assert_eq!(without.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_definition_on_unmapped_token_is_null() {
        let state = DocumentState::analyze(SOURCE.to_string());
        // `{` after config A
        let value = definition(&state, &params(0, 9), "file:///a.csl");
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_rename_produces_workspace_edit() {
        let state = DocumentState::analyze(SOURCE.to_string());
        let value = rename(
            &state,
            &json!({
                "position": { "line": 2, "character": 3 },
                "newName": "allow insecure",
            }),
            "file:///a.csl",
        );
        let edits = value["changes"]["file:///a.csl"].as_array().unwrap();
        // Declaration plus the constraint usage.
        assert_eq!(edits.len(), 2);
        for edit in edits {
            assert_eq!(edit["newText"], "`allow insecure`");
        }
    }
}
