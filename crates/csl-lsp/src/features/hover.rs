//! Hover cards for schemas and key definitions.

use crate::features::{definition_at, position_from_params, token_index_at};
use crate::state::DocumentState;
use csl_ast::{DefinitionRef, TypeKind};
use csl_printer::type_label;
use csl_span::WireRange;
use serde_json::{json, Value};

/// `textDocument/hover`: a Markdown card for the symbol under the cursor.
pub fn hover(state: &DocumentState, params: &Value) -> Value {
    let Some(position) = position_from_params(params) else { return Value::Null };
    let Some(index) = token_index_at(&state.tokens, position) else { return Value::Null };
    let Some(target) = definition_at(state, params) else { return Value::Null };

    let markdown = match target {
        DefinitionRef::Schema(schema_index) => {
            let Some(schema) = state.document.schemas.get(schema_index) else {
                return Value::Null;
            };
            let key_count = state
                .document
                .root_table(schema)
                .map(|t| t.explicit_keys.len())
                .unwrap_or(0);
            format!(
                "```csl\nconfig {}\n```\n\nSchema with {} top-level key{}.\n\nDeclared on line {}.",
                schema.name,
                key_count,
                if key_count == 1 { "" } else { "s" },
                schema.name_region.start.line + 1,
            )
        }
        DefinitionRef::Key(key_id) => {
            let key = state.document.arena.key(key_id);
            let label = type_label(&state.document.arena, key.ty);
            let mut card = format!(
                "```csl\n{}{}: {}\n```\n",
                key.name,
                if key.is_optional { "?" } else { "" },
                label,
            );
            // Table-typed keys list their immediate keys.
            if let TypeKind::Table(table) = &state.document.arena.ty(key.ty).kind {
                let names: Vec<&str> = table
                    .explicit_keys
                    .iter()
                    .map(|id| state.document.arena.key(*id).name.as_str())
                    .collect();
                card.push_str(&format!(
                    "\nTable with {} key{}{}.\n",
                    names.len(),
                    if names.len() == 1 { "" } else { "s" },
                    if names.is_empty() {
                        String::new()
                    } else {
                        format!(" ({})", names.join(", "))
                    },
                ));
            }
            card.push_str(&format!(
                "\n{}\n",
                if key.is_wildcard {
                    "Dynamic key, matches any undeclared sibling."
                } else if key.is_optional {
                    "Optional key."
                } else {
                    "Required key."
                },
            ));
            if let Some(default) = &key.default_value {
                card.push_str(&format!("\nDefault: `{}`\n", default.text));
            }
            card.push_str(&format!(
                "\nDeclared on line {}.",
                key.name_region.start.line + 1
            ));
            card
        }
    };

    json!({
        "contents": { "kind": "markdown", "value": markdown },
        "range": WireRange::from(state.tokens[index].region),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(line: u32, character: u32) -> Value {
        json!({ "position": { "line": line, "character": character } })
    }

    #[test]
    fn test_hover_on_table_key_lists_members() {
        let source =
            "config T { target: { x86: { lib: string; }; *: { lib: string; bin: string; }; }; }";
        let state = DocumentState::analyze(source.to_string());
        // `x86` declaration.
        let index = source.find("x86").unwrap() as u32;
        let value = hover(&state, &params(0, index));
        let markdown = value["contents"]["value"].as_str().unwrap();
        assert!(markdown.contains("Table with 1 key (lib)"), "{markdown}");
    }

    #[test]
    fn test_hover_on_schema_name() {
        let state = DocumentState::analyze("config A { x: string; y: number; }".to_string());
        let value = hover(&state, &params(0, 7));
        let markdown = value["contents"]["value"].as_str().unwrap();
        assert!(markdown.contains("config A"));
        assert!(markdown.contains("2 top-level keys"));
    }

    #[test]
    fn test_hover_shows_default_and_optionality() {
        let state =
            DocumentState::analyze("config A { env?: \"dev\" | \"prod\" = \"dev\"; }".to_string());
        let value = hover(&state, &params(0, 12));
        let markdown = value["contents"]["value"].as_str().unwrap();
        assert!(markdown.contains("Optional key."));
        assert!(markdown.contains("Default: `\"dev\"`"));
    }

    #[test]
    fn test_hover_outside_symbols_is_null() {
        let state = DocumentState::analyze("config A { x: string; }".to_string());
        assert_eq!(hover(&state, &params(0, 9)), Value::Null);
    }
}
