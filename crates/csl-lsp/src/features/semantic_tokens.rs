//! Semantic token encoding for full-document highlighting.
//!
//! Encodes the with-comments token stream into LSP's
//! `[deltaLine, deltaStart, length, tokenType, tokenModifiers]` quintuples
//! using the fixed legend from `csl-lsp-protocol`. Multi-line tokens are
//! reported whole when the client advertises `multilineTokenSupport` and
//! split into per-line segments otherwise.

use crate::state::DocumentState;
use csl_token::{Token, TokenKind};
use serde_json::{json, Value};

/// Legend index of a token kind; must match
/// [`csl_lsp_protocol::SEMANTIC_TOKEN_TYPES`].
fn legend_index(kind: TokenKind) -> u32 {
    match kind {
        TokenKind::Datetime => 0,
        TokenKind::Duration => 1,
        TokenKind::Number => 2,
        TokenKind::Boolean => 3,
        TokenKind::Keyword => 4,
        TokenKind::Type => 5,
        TokenKind::Identifier => 6,
        TokenKind::Punctuator => 7,
        TokenKind::Operator => 8,
        TokenKind::Comment => 9,
        TokenKind::String => 10,
        TokenKind::Unknown => 11,
    }
}

/// One absolute segment before delta encoding.
struct Segment {
    line: u32,
    start: u32,
    length: u32,
    token_type: u32,
}

fn segments_for(token: &Token, multiline_support: bool) -> Vec<Segment> {
    let token_type = legend_index(token.kind);
    let region = token.region;
    if region.line_span() == 0 {
        return vec![Segment {
            line: region.start.line,
            start: region.start.column,
            length: region.col_span(),
            token_type,
        }];
    }
    if multiline_support {
        // Whole token with the source literal length.
        return vec![Segment {
            line: region.start.line,
            start: region.start.column,
            length: token.value.chars().count() as u32,
            token_type,
        }];
    }
    // Split on the token's own source lines.
    token
        .value
        .split('\n')
        .enumerate()
        .map(|(i, line_text)| Segment {
            line: region.start.line + i as u32,
            start: if i == 0 { region.start.column } else { 0 },
            length: line_text.chars().count() as u32,
            token_type,
        })
        .collect()
}

/// `textDocument/semanticTokens/full` response.
pub fn full(state: &DocumentState, multiline_support: bool) -> Value {
    let mut data: Vec<u32> = Vec::with_capacity(state.tokens_with_comments.len() * 5);
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;
    for token in &state.tokens_with_comments {
        for segment in segments_for(token, multiline_support) {
            let delta_line = segment.line - prev_line;
            let delta_start =
                if delta_line == 0 { segment.start - prev_start } else { segment.start };
            data.extend([delta_line, delta_start, segment.length, segment.token_type, 0]);
            prev_line = segment.line;
            prev_start = segment.start;
        }
    }
    json!({ "data": data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use csl_span::{Position, Region};
    use pretty_assertions::assert_eq;

    /// Decodes quintuples back into absolute (line, start, length, type).
    fn decode(data: &[u32]) -> Vec<(u32, u32, u32, u32)> {
        let mut out = Vec::new();
        let mut line = 0;
        let mut start = 0;
        for chunk in data.chunks(5) {
            if chunk[0] > 0 {
                line += chunk[0];
                start = chunk[1];
            } else {
                start += chunk[1];
            }
            out.push((line, start, chunk[2], chunk[3]));
        }
        out
    }

    #[test]
    fn test_encoding_round_trips_regions() {
        let state = DocumentState::analyze("config A {\n  x: string; // note\n}".to_string());
        let value = full(&state, true);
        let data: Vec<u32> =
            value["data"].as_array().unwrap().iter().map(|v| v.as_u64().unwrap() as u32).collect();
        let decoded = decode(&data);
        assert_eq!(decoded.len(), state.tokens_with_comments.len());
        for (token, (line, start, length, token_type)) in
            state.tokens_with_comments.iter().zip(&decoded)
        {
            assert_eq!(token.region.start.line, *line);
            assert_eq!(token.region.start.column, *start);
            assert_eq!(token.region.col_span(), *length);
            assert_eq!(legend_index(token.kind), *token_type);
        }
    }

    #[test]
    fn test_comment_token_type() {
        let state = DocumentState::analyze("// hi\nconfig A { x: string; }".to_string());
        let value = full(&state, true);
        let data = value["data"].as_array().unwrap();
        // First quintuple is the comment: type index 9.
        assert_eq!(data[3], 9);
    }

    #[test]
    fn test_multiline_token_splits_without_support() {
        let source = "config A { x: string = \"ab\ncd\"; }";
        let state = DocumentState::analyze(source.to_string());
        let with_support = full(&state, true);
        let without = full(&state, false);
        let count = |v: &Value| v["data"].as_array().unwrap().len() / 5;
        assert_eq!(count(&without), count(&with_support) + 1);

        // The split segments cover each source line of the literal.
        let data: Vec<u32> = without["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_u64().unwrap() as u32)
            .collect();
        let decoded = decode(&data);
        let string_segments: Vec<_> =
            decoded.iter().filter(|(_, _, _, t)| *t == 10).collect();
        assert_eq!(string_segments.len(), 2);
        assert_eq!(string_segments[0].1, 23); // column of the opening quote
        assert_eq!(string_segments[1].0, 1);
        assert_eq!(string_segments[1].1, 0);
        assert_eq!(string_segments[1].2, 3); // `cd"`
    }

    #[test]
    fn test_region_helper() {
        let region = Region::new(Position::new(0, 2), Position::new(0, 7));
        assert_eq!(region.col_span(), 5);
    }
}
