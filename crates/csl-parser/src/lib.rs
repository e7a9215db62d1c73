//! Recursive-descent parser for the Config Schema Language.
//!
//! Consumes the lexer's token stream and produces a [`csl_ast::Document`]
//! together with accumulated diagnostics and the token↦definition map the
//! language server uses for navigation features.
//!
//! # Pipeline
//!
//! 1. **Grammar pass** ([`Parser`]): schemas, tables, keys, types,
//!    annotations, constraints, and a precedence-climbing expression
//!    parser. Recovery is local: a missing token is reported and parsing
//!    resynchronizes at the nearest statement boundary. The parser never
//!    aborts.
//! 2. **Resolution pass**: each table's constraint and annotation
//!    expressions resolve identifiers against the table's explicit keys
//!    (dotted paths follow table-typed keys), populating the definition
//!    map and reporting unknown identifiers and semantic violations.
//!
//! # Usage
//!
//! ```
//! use csl_parser::analyze;
//!
//! let analysis = analyze("config A { x: string; }");
//! assert!(analysis.errors.is_empty());
//! assert_eq!(analysis.document.schemas[0].name, "A");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod exprs;
mod grammar;
mod resolve;

pub use grammar::Parser;

use csl_ast::{DefinitionRef, Document};
use csl_span::Diagnostic;
use csl_token::Token;
use rustc_hash::FxHashMap;

/// Result of parsing a token stream.
#[derive(Debug, Default)]
pub struct ParseOutput {
    /// The parsed document.
    pub document: Document,
    /// Parse errors, in emission order.
    pub errors: Vec<Diagnostic>,
    /// Parse warnings.
    pub warnings: Vec<Diagnostic>,
    /// Token index → resolved definition, for declarations and usages.
    pub definitions: FxHashMap<usize, DefinitionRef>,
}

/// Result of lexing and parsing a source document in one step.
#[derive(Debug, Default)]
pub struct Analysis {
    /// The comment-free token stream the parser consumed.
    pub tokens: Vec<Token>,
    /// The parsed document.
    pub document: Document,
    /// Lexer errors followed by parser errors.
    pub errors: Vec<Diagnostic>,
    /// Lexer warnings followed by parser warnings.
    pub warnings: Vec<Diagnostic>,
    /// Token index → resolved definition.
    pub definitions: FxHashMap<usize, DefinitionRef>,
}

/// Lexes and parses `source`.
pub fn analyze(source: &str) -> Analysis {
    let lex = csl_lexer::tokenize(source);
    let output = Parser::new(&lex.tokens).parse();

    let mut errors = lex.errors;
    errors.extend(output.errors);
    let mut warnings = lex.warnings;
    warnings.extend(output.warnings);

    Analysis {
        tokens: lex.tokens,
        document: output.document,
        errors,
        warnings,
        definitions: output.definitions,
    }
}
