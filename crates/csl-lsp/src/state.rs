//! Server lifecycle and per-document state.

use csl_ast::{DefinitionRef, Document};
use csl_span::Diagnostic;
use csl_token::Token;
use rustc_hash::FxHashMap;

/// The lifecycle of the server, advanced one transition at a time by the
/// dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No `initialize` seen yet.
    Start,
    /// `initialize` answered; waiting for the `initialized` notification.
    ServerInitialized,
    /// Fully operational.
    ClientInitialized,
    /// `shutdown` answered; only `exit` is acceptable now.
    ShuttingDown,
}

/// Everything the server caches for one open document.
///
/// Recomputed synchronously inside `didOpen`/`didChange`, so every later
/// request on the same document sees a coherent snapshot. Dropped as a
/// whole when the document closes or is replaced.
pub struct DocumentState {
    /// Full source text (full-sync model).
    pub text: String,
    /// Token stream without comments; the parser and all position-based
    /// lookups use this stream's indices.
    pub tokens: Vec<Token>,
    /// Token stream with comments, used only for semantic highlighting
    /// and comment folding.
    pub tokens_with_comments: Vec<Token>,
    /// Parsed schemas.
    pub document: Document,
    /// Token index → definition, for navigation features.
    pub definitions: FxHashMap<usize, DefinitionRef>,
    /// Lex and parse errors.
    pub errors: Vec<Diagnostic>,
    /// Lex and parse warnings.
    pub warnings: Vec<Diagnostic>,
}

impl DocumentState {
    /// Lexes (twice: with and without comments) and parses `text`.
    pub fn analyze(text: String) -> Self {
        let with_comments = csl_lexer::tokenize_with_comments(&text);
        let analysis = csl_parser::analyze(&text);
        Self {
            text,
            tokens: analysis.tokens,
            tokens_with_comments: with_comments.tokens,
            document: analysis.document,
            definitions: analysis.definitions,
            errors: analysis.errors,
            warnings: analysis.warnings,
        }
    }
}
