//! Whole-document formatting through the canonical printer.

use crate::state::DocumentState;
use csl_printer::{line_edits, print_document};
use serde_json::Value;

/// `textDocument/formatting`: canonical rendering diffed against the
/// cached text, as line-granular edits.
pub fn format(state: &DocumentState) -> Value {
    let canonical = print_document(&state.document);
    let edits = line_edits(&state.text, &canonical);
    serde_json::to_value(edits).unwrap_or_else(|_| Value::Array(Vec::new()))
}
