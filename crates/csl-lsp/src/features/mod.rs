//! LSP feature providers.
//!
//! Every provider is a pure function over a [`DocumentState`] snapshot;
//! the server loop owns the cache and routes requests here.

pub mod completion;
pub mod diagnostics;
pub mod folding;
pub mod formatting;
pub mod hover;
pub mod htmldoc;
pub mod navigation;
pub mod semantic_tokens;

use crate::state::DocumentState;
use csl_ast::DefinitionRef;
use csl_span::{Position, Region};
use csl_token::Token;
use serde_json::Value;

/// Extracts `params.position` as a document position.
pub(crate) fn position_from_params(params: &Value) -> Option<Position> {
    let position = params.get("position")?;
    Some(Position::new(
        position.get("line")?.as_u64()? as u32,
        position.get("character")?.as_u64()? as u32,
    ))
}

/// Index of the token whose region contains `position`.
pub(crate) fn token_index_at(tokens: &[Token], position: Position) -> Option<usize> {
    tokens.iter().position(|t| t.region.contains(position))
}

/// The definition the token under the cursor resolves to.
pub(crate) fn definition_at(state: &DocumentState, params: &Value) -> Option<DefinitionRef> {
    let position = position_from_params(params)?;
    let index = token_index_at(&state.tokens, position)?;
    state.definitions.get(&index).copied()
}

/// The name region of a definition, for definition/hover targets.
pub(crate) fn definition_name_region(
    state: &DocumentState,
    definition: DefinitionRef,
) -> Option<Region> {
    match definition {
        DefinitionRef::Schema(index) => {
            state.document.schemas.get(index).map(|s| s.name_region)
        }
        DefinitionRef::Key(key) => Some(state.document.arena.key(key).name_region),
    }
}

/// Backtick-quotes a name unless it is a bare identifier.
pub(crate) fn quote_if_needed(name: &str) -> String {
    let bare = {
        let mut chars = name.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && name.chars().skip(1).all(|c| c.is_ascii_alphanumeric() || c == '_')
    };
    if bare {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 2);
    out.push('`');
    for ch in name.chars() {
        if ch == '`' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('`');
    out
}
