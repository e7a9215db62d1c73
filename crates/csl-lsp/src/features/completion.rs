//! Completion: member access after `.`, sibling keys in the enclosing
//! table, and the keyword/type vocabulary.

use crate::features::{position_from_params, quote_if_needed, token_index_at};
use crate::state::DocumentState;
use csl_ast::{DefinitionRef, TypeId, TypeKind};
use csl_printer::type_label;
use csl_span::Position;
use csl_token::TokenKind;
use serde_json::{json, Value};

const KIND_FIELD: u32 = 5;
const KIND_CLASS: u32 = 7;
const KIND_KEYWORD: u32 = 14;

const TYPE_KEYWORDS: [&str; 7] =
    ["string", "number", "boolean", "datetime", "duration", "any{}", "any[]"];
const RESERVED_WORDS: [&str; 11] = [
    "config",
    "constraints",
    "requires",
    "conflicts",
    "with",
    "validate",
    "exists",
    "count_keys",
    "all_keys",
    "wildcard_keys",
    "subset",
];

fn key_item(state: &DocumentState, key_id: csl_ast::KeyId) -> Value {
    let key = state.document.arena.key(key_id);
    json!({
        "label": key.name,
        "kind": KIND_FIELD,
        "insertText": quote_if_needed(&key.name),
        "detail": type_label(&state.document.arena, key.ty),
    })
}

/// Keys of the table a definition's type denotes, if it is table-typed.
fn member_items(state: &DocumentState, definition: DefinitionRef) -> Vec<Value> {
    let ty = match definition {
        DefinitionRef::Schema(index) => {
            let Some(schema) = state.document.schemas.get(index) else { return Vec::new() };
            schema.root
        }
        DefinitionRef::Key(key) => state.document.arena.key(key).ty,
    };
    let TypeKind::Table(table) = &state.document.arena.ty(ty).kind else { return Vec::new() };
    table.explicit_keys.iter().map(|id| key_item(state, *id)).collect()
}

/// The deepest table type whose region contains the position.
///
/// Tables are visited in pre-order, so the last containing one wins.
fn deepest_table_at(state: &DocumentState, position: Position) -> Option<TypeId> {
    let mut found = None;
    for schema in &state.document.schemas {
        csl_ast::walk_tables(&state.document.arena, schema.root, &mut |_, id, _| {
            if state.document.arena.ty(id).region.contains(position) {
                found = Some(id);
            }
        });
    }
    found
}

/// `textDocument/completion`.
pub fn complete(state: &DocumentState, params: &Value) -> Value {
    let Some(position) = position_from_params(params) else {
        return Value::Array(Vec::new());
    };
    let tokens = &state.tokens;
    // Prefer the token ending exactly at the cursor (the character just
    // typed) over the one starting there.
    let index = tokens
        .iter()
        .position(|t| t.region.end == position)
        .or_else(|| token_index_at(tokens, position));

    // Member completion: cursor right after `.`, or inside an identifier
    // that follows `.`.
    if let Some(index) = index {
        let (dot_index, prefix) = if tokens[index].is(TokenKind::Operator, ".") {
            (Some(index), String::new())
        } else if tokens[index].kind == TokenKind::Identifier
            && index > 0
            && tokens[index - 1].is(TokenKind::Operator, ".")
        {
            (Some(index - 1), prefix_of(state, index, position))
        } else {
            (None, String::new())
        };
        if let Some(dot_index) = dot_index {
            if dot_index == 0 {
                return Value::Array(Vec::new());
            }
            let Some(definition) = state.definitions.get(&(dot_index - 1)) else {
                return Value::Array(Vec::new());
            };
            let items: Vec<Value> = member_items(state, *definition)
                .into_iter()
                .filter(|item| {
                    item["label"].as_str().is_some_and(|label| label.starts_with(&prefix))
                })
                .collect();
            return Value::Array(items);
        }
    }

    // Scope completion inside the deepest enclosing table.
    let prefix = index
        .filter(|i| tokens[*i].kind == TokenKind::Identifier)
        .map(|i| prefix_of(state, i, position))
        .unwrap_or_default();

    let mut items = Vec::new();
    if let Some(table_id) = deepest_table_at(state, position) {
        if let TypeKind::Table(table) = &state.document.arena.ty(table_id).kind {
            for key_id in &table.explicit_keys {
                let key = state.document.arena.key(*key_id);
                if key.name.starts_with(&prefix) {
                    items.push(key_item(state, *key_id));
                }
            }
        }
    }
    for word in TYPE_KEYWORDS {
        items.push(json!({ "label": word, "kind": KIND_CLASS, "insertText": word }));
    }
    for word in RESERVED_WORDS {
        items.push(json!({ "label": word, "kind": KIND_KEYWORD, "insertText": word }));
    }
    Value::Array(items)
}

/// The part of an identifier token before the cursor.
fn prefix_of(state: &DocumentState, index: usize, position: Position) -> String {
    let token = &state.tokens[index];
    if token.region.start.line != position.line {
        return token.value.to_string();
    }
    let taken = (position.column.saturating_sub(token.region.start.column)) as usize;
    token.value.chars().take(taken).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(line: u32, character: u32) -> Value {
        json!({ "position": { "line": line, "character": character } })
    }

    fn labels(value: &Value) -> Vec<String> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["label"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_member_completion_after_dot() {
        let source = "config A {\n  db: { ssl: boolean; host: string; };\n  constraints { validate db.; }\n}";
        let state = DocumentState::analyze(source.to_string());
        // Cursor right after the dot on line 2: `validate db.`
        let dot = source.lines().nth(2).unwrap().find('.').unwrap() as u32;
        let value = complete(&state, &params(2, dot + 1));
        let labels = labels(&value);
        assert!(labels.contains(&"ssl".to_string()), "{labels:?}");
        assert!(labels.contains(&"host".to_string()), "{labels:?}");
        assert!(!labels.contains(&"config".to_string()));
    }

    #[test]
    fn test_scope_completion_prefix_matches_keys() {
        let source = "config A {\n  database: string;\n  debug: boolean;\n  constraints { validate d; }\n}";
        let state = DocumentState::analyze(source.to_string());
        // Cursor after the `d` identifier in the validate expression.
        let d_col = source.lines().nth(3).unwrap().rfind('d').unwrap() as u32;
        let value = complete(&state, &params(3, d_col + 1));
        let labels = labels(&value);
        assert!(labels.contains(&"database".to_string()), "{labels:?}");
        assert!(labels.contains(&"debug".to_string()));
        // Keywords and types are always offered.
        assert!(labels.contains(&"validate".to_string()));
        assert!(labels.contains(&"string".to_string()));
    }

    #[test]
    fn test_non_bare_labels_get_backticked_insert_text() {
        let source = "config A { `weird name`: { inner: string; }; x: boolean; }";
        let state = DocumentState::analyze(source.to_string());
        let value = complete(&state, &params(0, 45));
        let items = value.as_array().unwrap();
        let weird = items
            .iter()
            .find(|item| item["label"] == "weird name")
            .expect("key offered in scope");
        assert_eq!(weird["insertText"], "`weird name`");
    }

    #[test]
    fn test_completion_outside_tables_offers_vocabulary() {
        let state = DocumentState::analyze("config A { x: string; }".to_string());
        let value = complete(&state, &params(5, 0));
        let labels = labels(&value);
        assert!(labels.contains(&"config".to_string()));
        assert!(!labels.contains(&"x".to_string()));
    }
}
