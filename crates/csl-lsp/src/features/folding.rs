//! Folding ranges: brace pairs and comment runs.

use crate::state::DocumentState;
use csl_token::TokenKind;
use serde_json::{json, Value};

/// `textDocument/foldingRange`.
///
/// Braces pair up LIFO; a pair spanning more than one line folds from its
/// opening line to the line before the closing brace. Runs of two or more
/// comment lines fold as comments.
pub fn folding_ranges(state: &DocumentState) -> Value {
    let mut folds = Vec::new();
    let mut stack: Vec<u32> = Vec::new();

    for token in &state.tokens_with_comments {
        if token.is(TokenKind::Punctuator, "{") {
            stack.push(token.region.start.line);
        } else if token.is(TokenKind::Punctuator, "}") {
            if let Some(open_line) = stack.pop() {
                let close_line = token.region.start.line;
                if close_line > open_line {
                    folds.push(json!({
                        "startLine": open_line,
                        "endLine": close_line - 1,
                        "kind": "region",
                    }));
                }
            }
        }
    }

    // Runs of adjacent comment lines.
    let mut run_start: Option<u32> = None;
    let mut run_end = 0u32;
    let comment_lines = state
        .tokens_with_comments
        .iter()
        .filter(|t| t.kind == TokenKind::Comment)
        .map(|t| t.region.start.line);
    for line in comment_lines.chain(std::iter::once(u32::MAX)) {
        match run_start {
            Some(_) if line == run_end + 1 => run_end = line,
            Some(start) => {
                if run_end > start {
                    folds.push(json!({
                        "startLine": start,
                        "endLine": run_end,
                        "kind": "comment",
                    }));
                }
                run_start = (line != u32::MAX).then_some(line);
                run_end = line;
            }
            None => {
                run_start = (line != u32::MAX).then_some(line);
                run_end = line;
            }
        }
    }

    Value::Array(folds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brace_folds() {
        let source = "config A {\n  db: {\n    ssl: boolean;\n  };\n  x: string;\n}";
        let state = DocumentState::analyze(source.to_string());
        let folds = folding_ranges(&state);
        let folds = folds.as_array().unwrap();
        assert!(folds.iter().any(|f| f["startLine"] == 0 && f["endLine"] == 4));
        assert!(folds.iter().any(|f| f["startLine"] == 1 && f["endLine"] == 2));
    }

    #[test]
    fn test_single_line_table_does_not_fold() {
        let state = DocumentState::analyze("config A { x: string; }".to_string());
        let folds = folding_ranges(&state);
        assert_eq!(folds.as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_comment_run_folds() {
        let source = "// one\n// two\n// three\nconfig A {\n  x: string; // tail\n}";
        let state = DocumentState::analyze(source.to_string());
        let folds = folding_ranges(&state);
        let folds = folds.as_array().unwrap();
        let comment = folds.iter().find(|f| f["kind"] == "comment").unwrap();
        assert_eq!(comment["startLine"], 0);
        assert_eq!(comment["endLine"], 2);
        // The single trailing comment does not fold.
        assert_eq!(folds.iter().filter(|f| f["kind"] == "comment").count(), 1);
    }

    #[test]
    fn test_unbalanced_braces_are_tolerated() {
        let state = DocumentState::analyze("config A { x: { y: string;".to_string());
        let folds = folding_ranges(&state);
        assert!(folds.as_array().is_some());
    }
}
