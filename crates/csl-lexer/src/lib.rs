//! Lexer for the Config Schema Language.
//!
//! Converts source text into a typed token stream with line/column regions,
//! plus accumulated error and warning diagnostics. The lexer never aborts:
//! malformed input produces diagnostics and scanning continues, so the
//! parser and language server always receive a complete stream.
//!
//! # Architecture
//!
//! - **Cursor**: a cloneable character cursor tracks line/column positions;
//!   cloning is the backtracking mechanism for speculative scans
//!   (datetimes, durations, raw-literal tags).
//! - **Buffered unknown runs**: unrecognized characters accumulate in the
//!   [`TokenStream`] buffer and flush as a single `Unknown` token with one
//!   diagnostic when the next recognized token lands.
//! - **Recognition priority**: comments, then strings/quoted identifiers,
//!   then datetimes, durations, numbers, words (booleans, keywords, types,
//!   identifiers), then operators and punctuators.
//!
//! # Usage
//!
//! ```
//! use csl_lexer::tokenize;
//!
//! let output = tokenize("config A { x: string; }");
//! assert!(output.errors.is_empty());
//! assert_eq!(output.tokens.len(), 8);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cursor;
mod datetime;
mod duration;
mod escape;
mod keywords;
mod numbers;
mod strings;

pub use escape::{decode_escapes, literal_content};
pub use keywords::{PRIMITIVE_TYPES, RESERVED_KEYWORDS};

use cursor::Cursor;
use csl_span::{Diagnostic, Position, Region};
use csl_token::{StringForm, Token, TokenKind, TokenStream, TypeDescriptor};
use datetime::try_scan_datetime;
use duration::{try_scan_iso_duration, try_scan_shorthand_suffix};
use keywords::TWO_CHAR_OPERATORS;
use numbers::scan_number;
use strings::{scan_basic_quoted, try_scan_raw};

/// Configuration for a lexer run.
#[derive(Debug, Clone, Default)]
pub struct LexerConfig {
    /// Keep `//` comments in the token stream (used for semantic
    /// highlighting and comment folding).
    pub preserve_comments: bool,
}

/// Result of tokenizing a document.
#[derive(Debug, Default)]
pub struct LexOutput {
    /// The recognized tokens, in source order.
    pub tokens: Vec<Token>,
    /// Hard lexical problems (unclosed literals, bad escapes, ...).
    pub errors: Vec<Diagnostic>,
    /// Soft problems (digit grouping).
    pub warnings: Vec<Diagnostic>,
}

/// Tokenizes `input` without preserving comments.
pub fn tokenize(input: &str) -> LexOutput {
    Lexer::new(input).tokenize()
}

/// Tokenizes `input` keeping comment tokens in the stream.
pub fn tokenize_with_comments(input: &str) -> LexOutput {
    Lexer::with_config(input, LexerConfig { preserve_comments: true }).tokenize()
}

/// The CSL lexer.
pub struct Lexer<'a> {
    input: &'a str,
    cursor: Cursor<'a>,
    config: LexerConfig,
    stream: TokenStream,
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer with the default configuration.
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, LexerConfig::default())
    }

    /// Creates a lexer with an explicit configuration.
    pub fn with_config(input: &'a str, config: LexerConfig) -> Self {
        Self {
            input,
            cursor: Cursor::new(input),
            config,
            stream: TokenStream::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Runs the lexer to completion.
    pub fn tokenize(mut self) -> LexOutput {
        loop {
            self.skip_whitespace();
            if self.cursor.is_eof() {
                if let Some(region) = self.stream.flush_unknown() {
                    self.errors.push(unknown_run_error(region));
                }
                break;
            }
            self.next_token();
        }
        LexOutput { tokens: self.stream.into_tokens(), errors: self.errors, warnings: self.warnings }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.cursor.peek() {
            match ch {
                ' ' | '\t' | '\n' => {
                    self.cursor.bump();
                }
                '\r' => {
                    let at = self.cursor.position();
                    self.cursor.bump();
                    if self.cursor.peek() != Some('\n') {
                        self.errors.push(Diagnostic::error(
                            "line ending is not valid",
                            Region::new(at, self.cursor.position()),
                        ));
                    }
                }
                _ => break,
            }
        }
    }

    /// Pushes a recognized token, flushing any pending unknown run.
    fn emit(&mut self, token: Token) {
        if let Some(region) = self.stream.push(token) {
            self.errors.push(unknown_run_error(region));
        }
    }

    fn next_token(&mut self) {
        let start = self.cursor.position();
        let start_byte = self.cursor.byte_offset();
        let Some(ch) = self.cursor.peek() else { return };

        match ch {
            '/' if self.cursor.starts_with("//") => self.scan_comment(start, start_byte),
            '"' => self.scan_string(start, start_byte),
            '`' => self.scan_quoted_identifier(start, start_byte),
            'R' if matches!(self.cursor.peek_at(1), Some('"') | Some('`')) => {
                if !self.scan_raw_literal(start, start_byte) {
                    self.scan_word(start, start_byte);
                }
            }
            'P' if self.cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit() || c == 'T') => {
                if !self.scan_iso_duration(start, start_byte) {
                    self.scan_word(start, start_byte);
                }
            }
            c if c.is_ascii_digit() => self.scan_numeric(start, start_byte),
            c if c.is_ascii_alphabetic() || c == '_' => self.scan_word(start, start_byte),
            '+' | '-' => self.scan_sign(start, start_byte),
            _ => self.scan_operator_or_unknown(start, start_byte, ch),
        }
    }

    fn token_region(&self, start: Position) -> Region {
        Region::new(start, self.cursor.position())
    }

    fn scan_comment(&mut self, start: Position, start_byte: usize) {
        self.cursor.bump();
        self.cursor.bump();
        let mut reported = false;
        while let Some(ch) = self.cursor.peek() {
            if ch == '\n' || (ch == '\r' && self.cursor.peek_at(1) == Some('\n')) {
                break;
            }
            let at = self.cursor.position();
            self.cursor.bump();
            let forbidden = matches!(ch, '\u{0000}'..='\u{0008}' | '\u{000b}'..='\u{001f}' | '\u{007f}');
            if forbidden && !reported {
                reported = true;
                self.errors.push(Diagnostic::error(
                    "comment contains a control character",
                    Region::new(at, self.cursor.position()),
                ));
            }
        }
        if self.config.preserve_comments {
            let text = self.cursor.slice_from(start_byte);
            self.emit(Token::new(text, TokenKind::Comment, self.token_region(start)));
        } else if let Some(region) = self.stream.flush_unknown() {
            // A comment is recognized input even when not preserved.
            self.errors.push(unknown_run_error(region));
        }
    }

    fn scan_string(&mut self, start: Position, start_byte: usize) {
        self.cursor.bump();
        let scan = scan_basic_quoted(&mut self.cursor, '"');
        for (message, region) in &scan.errors {
            self.errors.push(Diagnostic::error(*message, *region));
        }
        let region = self.token_region(start);
        if !scan.closed {
            self.errors.push(Diagnostic::error(
                "String literal or quoted identifier is not closed",
                Region::new(start, scan_first_line_end(start, region)),
            ));
        }
        let form =
            if scan.has_newline { StringForm::MultiLineBasic } else { StringForm::Basic };
        let text = self.cursor.slice_from(start_byte);
        self.emit(Token::with_descriptor(
            text,
            TokenKind::String,
            TypeDescriptor::String(form),
            region,
        ));
    }

    fn scan_quoted_identifier(&mut self, start: Position, start_byte: usize) {
        self.cursor.bump();
        let scan = scan_basic_quoted(&mut self.cursor, '`');
        for (message, region) in &scan.errors {
            self.errors.push(Diagnostic::error(*message, *region));
        }
        let region = self.token_region(start);
        if !scan.closed {
            self.errors.push(Diagnostic::error(
                "String literal or quoted identifier is not closed",
                Region::new(start, scan_first_line_end(start, region)),
            ));
        }
        let text = self.cursor.slice_from(start_byte);
        self.emit(Token::new(text, TokenKind::Identifier, region));
    }

    /// Returns false when the `R` is not followed by a raw-literal shape.
    fn scan_raw_literal(&mut self, start: Position, start_byte: usize) -> bool {
        let quote = match self.cursor.peek_at(1) {
            Some(q @ ('"' | '`')) => q,
            _ => return false,
        };
        let Some(scan) = try_scan_raw(&mut self.cursor, quote, self.input) else {
            return false;
        };
        let region = self.token_region(start);
        for (message, at) in &scan.errors {
            self.errors.push(Diagnostic::error(*message, *at));
        }
        if scan.tag_too_long {
            self.errors
                .push(Diagnostic::error("raw literal tag is longer than 16 characters", region));
        }
        if !scan.closed {
            self.errors.push(Diagnostic::error(
                "String literal or quoted identifier is not closed",
                Region::new(start, scan_first_line_end(start, region)),
            ));
        }
        let text = self.cursor.slice_from(start_byte);
        if quote == '"' {
            let form = if scan.has_newline { StringForm::MultiLineRaw } else { StringForm::Raw };
            self.emit(Token::with_descriptor(
                text,
                TokenKind::String,
                TypeDescriptor::String(form),
                region,
            ));
        } else {
            self.emit(Token::new(text, TokenKind::Identifier, region));
        }
        true
    }

    fn scan_iso_duration(&mut self, start: Position, start_byte: usize) -> bool {
        let Some(scan) = try_scan_iso_duration(&mut self.cursor) else {
            return false;
        };
        let region = self.token_region(start);
        let descriptor = if scan.errors.is_empty() {
            TypeDescriptor::Duration
        } else {
            TypeDescriptor::Invalid
        };
        for message in scan.errors {
            self.errors.push(Diagnostic::error(message, region));
        }
        let text = self.cursor.slice_from(start_byte);
        self.emit(Token::with_descriptor(text, TokenKind::Duration, descriptor, region));
        true
    }

    fn scan_numeric(&mut self, start: Position, start_byte: usize) {
        if let Some(scan) = try_scan_datetime(&mut self.cursor) {
            let region = self.token_region(start);
            let descriptor = if scan.errors.is_empty() {
                TypeDescriptor::DateTime(scan.form)
            } else {
                TypeDescriptor::Invalid
            };
            for message in scan.errors {
                self.errors.push(Diagnostic::error(message, region));
            }
            let text = self.cursor.slice_from(start_byte);
            self.emit(Token::with_descriptor(text, TokenKind::Datetime, descriptor, region));
            return;
        }

        let number = scan_number(&mut self.cursor);

        // A shorthand suffix turns the number into a duration.
        if let Some(scan) = try_scan_shorthand_suffix(&mut self.cursor) {
            let region = self.token_region(start);
            let descriptor = if scan.errors.is_empty() {
                TypeDescriptor::Duration
            } else {
                TypeDescriptor::Invalid
            };
            for message in scan.errors {
                self.errors.push(Diagnostic::error(message, region));
            }
            if !number.grouping_reasonable {
                self.warnings
                    .push(Diagnostic::warning("digit grouping is not reasonable", region));
            }
            let text = self.cursor.slice_from(start_byte);
            self.emit(Token::with_descriptor(text, TokenKind::Duration, descriptor, region));
            return;
        }

        let region = self.token_region(start);
        if number.malformed {
            self.errors.push(Diagnostic::error("number literal is not valid", region));
        }
        if !number.grouping_reasonable {
            self.warnings.push(Diagnostic::warning("digit grouping is not reasonable", region));
        }
        let text = self.cursor.slice_from(start_byte);
        self.emit(Token::with_descriptor(text, TokenKind::Number, number.descriptor, region));
    }

    fn scan_word(&mut self, start: Position, start_byte: usize) {
        self.cursor.bump_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let word = self.cursor.slice_from(start_byte);

        // `any{}` / `any[]` glue into a single type keyword.
        if word == "any" && (self.cursor.starts_with("{}") || self.cursor.starts_with("[]")) {
            self.cursor.bump();
            self.cursor.bump();
            let text = self.cursor.slice_from(start_byte);
            self.emit(Token::new(text, TokenKind::Type, self.token_region(start)));
            return;
        }

        let region = self.token_region(start);
        let token = match word {
            "true" | "false" => {
                Token::with_descriptor(word, TokenKind::Boolean, TypeDescriptor::Boolean, region)
            }
            "nan" => Token::with_descriptor(
                word,
                TokenKind::Number,
                TypeDescriptor::SpecialNumber(csl_token::SpecialNumber::NaN),
                region,
            ),
            "inf" => Token::with_descriptor(
                word,
                TokenKind::Number,
                TypeDescriptor::SpecialNumber(csl_token::SpecialNumber::Infinity),
                region,
            ),
            _ if PRIMITIVE_TYPES.contains(word) => Token::new(word, TokenKind::Type, region),
            _ if RESERVED_KEYWORDS.contains(word) => Token::new(word, TokenKind::Keyword, region),
            _ => Token::new(word, TokenKind::Identifier, region),
        };
        self.emit(token);
    }

    fn scan_sign(&mut self, start: Position, _start_byte: usize) {
        // A sign directly on a non-decimal literal is an error; the sign
        // still lexes as an operator and the number follows on its own.
        if self.cursor.peek_at(1) == Some('0')
            && matches!(self.cursor.peek_at(2), Some('x') | Some('o') | Some('b'))
        {
            let mut probe = self.cursor.clone();
            probe.bump();
            probe.bump();
            probe.bump();
            let region = Region::new(start, probe.position());
            self.errors
                .push(Diagnostic::error("sign is not allowed on a non-decimal number", region));
        }
        let ch = self.cursor.peek().unwrap_or('+');
        self.cursor.bump();
        self.emit(Token::new(
            ch.to_string(),
            TokenKind::Operator,
            self.token_region(start),
        ));
    }

    fn scan_operator_or_unknown(&mut self, start: Position, start_byte: usize, ch: char) {
        // `=>` and the two-character operators, longest match first.
        if self.cursor.starts_with("=>") {
            self.cursor.bump();
            self.cursor.bump();
            let text = self.cursor.slice_from(start_byte);
            self.emit(Token::new(text, TokenKind::Punctuator, self.token_region(start)));
            return;
        }
        for op in TWO_CHAR_OPERATORS {
            if self.cursor.starts_with(op) {
                self.cursor.bump();
                self.cursor.bump();
                let text = self.cursor.slice_from(start_byte);
                self.emit(Token::new(text, TokenKind::Operator, self.token_region(start)));
                return;
            }
        }
        let kind = match ch {
            '{' | '}' | '[' | ']' | '(' | ')' | ',' | ':' | ';' => Some(TokenKind::Punctuator),
            '~' | '!' | '*' | '/' | '%' | '<' | '>' | '&' | '^' | '|' | '=' | '?' | '.' | '@' => {
                Some(TokenKind::Operator)
            }
            _ => None,
        };
        match kind {
            Some(kind) => {
                self.cursor.bump();
                let text = self.cursor.slice_from(start_byte);
                self.emit(Token::new(text, kind, self.token_region(start)));
            }
            None => {
                self.cursor.bump();
                self.stream.push_unknown_char(ch, start, self.cursor.position());
            }
        }
    }
}

fn unknown_run_error(region: Region) -> Diagnostic {
    Diagnostic::error("character sequence is not recognized", region)
}

/// Clamps an unclosed-literal diagnostic to the literal's first line.
fn scan_first_line_end(start: Position, region: Region) -> Position {
    if region.end.line > start.line {
        // Column from the region is on a later line; report to end of the
        // start line using a wide sentinel column.
        Position::new(start.line, u32::MAX)
    } else {
        region.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<(TokenKind, String)> {
        tokenize(input).tokens.iter().map(|t| (t.kind, t.value.to_string())).collect()
    }

    #[test]
    fn test_minimal_schema() {
        let output = tokenize("config A { x: string; }");
        assert!(output.errors.is_empty());
        assert!(output.warnings.is_empty());
        let expected = vec![
            (TokenKind::Keyword, "config".to_string()),
            (TokenKind::Identifier, "A".to_string()),
            (TokenKind::Punctuator, "{".to_string()),
            (TokenKind::Identifier, "x".to_string()),
            (TokenKind::Punctuator, ":".to_string()),
            (TokenKind::Type, "string".to_string()),
            (TokenKind::Punctuator, ";".to_string()),
            (TokenKind::Punctuator, "}".to_string()),
        ];
        assert_eq!(kinds("config A { x: string; }"), expected);
        assert_eq!(output.tokens.len(), 8);
    }

    #[test]
    fn test_keyword_requires_word_boundary() {
        let tokens = kinds("config_foo");
        assert_eq!(tokens, vec![(TokenKind::Identifier, "config_foo".to_string())]);
    }

    #[test]
    fn test_any_types_glue() {
        assert_eq!(
            kinds("any{} any[] any"),
            vec![
                (TokenKind::Type, "any{}".to_string()),
                (TokenKind::Type, "any[]".to_string()),
                (TokenKind::Identifier, "any".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_run_single_token_and_diagnostic() {
        let output = tokenize("$foo");
        assert_eq!(output.tokens.len(), 2);
        assert_eq!(output.tokens[0].kind, TokenKind::Unknown);
        assert_eq!(&*output.tokens[0].value, "$");
        assert_eq!(output.tokens[1].kind, TokenKind::Identifier);
        assert_eq!(output.errors.len(), 1);
    }

    #[test]
    fn test_unknown_run_coalesces() {
        let output = tokenize("$$$ x");
        assert_eq!(output.tokens[0].kind, TokenKind::Unknown);
        assert_eq!(&*output.tokens[0].value, "$$$");
        assert_eq!(output.errors.len(), 1);
    }

    #[test]
    fn test_operators_longest_match() {
        assert_eq!(
            kinds("== != <= >= && || << >> < = > |"),
            vec![
                (TokenKind::Operator, "==".to_string()),
                (TokenKind::Operator, "!=".to_string()),
                (TokenKind::Operator, "<=".to_string()),
                (TokenKind::Operator, ">=".to_string()),
                (TokenKind::Operator, "&&".to_string()),
                (TokenKind::Operator, "||".to_string()),
                (TokenKind::Operator, "<<".to_string()),
                (TokenKind::Operator, ">>".to_string()),
                (TokenKind::Operator, "<".to_string()),
                (TokenKind::Operator, "=".to_string()),
                (TokenKind::Operator, ">".to_string()),
                (TokenKind::Operator, "|".to_string()),
            ]
        );
    }

    #[test]
    fn test_fat_arrow_is_punctuator() {
        assert_eq!(
            kinds("a => b"),
            vec![
                (TokenKind::Identifier, "a".to_string()),
                (TokenKind::Punctuator, "=>".to_string()),
                (TokenKind::Identifier, "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments_skipped_by_default() {
        let output = tokenize("x // trailing\ny");
        assert_eq!(output.tokens.len(), 2);
    }

    #[test]
    fn test_comments_preserved_on_request() {
        let output = tokenize_with_comments("x // trailing\ny");
        assert_eq!(output.tokens.len(), 3);
        assert_eq!(output.tokens[1].kind, TokenKind::Comment);
        assert_eq!(&*output.tokens[1].value, "// trailing");
    }

    #[test]
    fn test_string_descriptor_forms() {
        let output = tokenize(r#""dev""#);
        assert_eq!(
            output.tokens[0].descriptor,
            Some(TypeDescriptor::String(StringForm::Basic))
        );

        let output = tokenize("\"a\nb\"");
        assert_eq!(
            output.tokens[0].descriptor,
            Some(TypeDescriptor::String(StringForm::MultiLineBasic))
        );

        let output = tokenize(r#"R"t(a)t""#);
        assert_eq!(output.tokens[0].descriptor, Some(TypeDescriptor::String(StringForm::Raw)));
    }

    #[test]
    fn test_unterminated_string_recovers() {
        let output = tokenize("config A { x: string = \"abc\n; y: number; }");
        assert!(output
            .errors
            .iter()
            .any(|e| e.message == "String literal or quoted identifier is not closed"));
        assert!(output.errors.iter().all(|e| e.region.start.line == 0));
        // The glued string swallows the rest, but lexing completed.
        assert!(!output.tokens.is_empty());
    }

    #[test]
    fn test_stray_carriage_return() {
        let output = tokenize("x \r y");
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].message, "line ending is not valid");
        let output = tokenize("x\r\ny");
        assert!(output.errors.is_empty());
    }

    #[test]
    fn test_datetime_tokens() {
        let output = tokenize("2024-01-02T03:04:05Z");
        assert_eq!(output.tokens.len(), 1);
        assert_eq!(output.tokens[0].kind, TokenKind::Datetime);
        assert_eq!(
            output.tokens[0].descriptor,
            Some(TypeDescriptor::DateTime(csl_token::DateTimeForm::OffsetDateTime))
        );
    }

    #[test]
    fn test_invalid_date_reports_error() {
        let output = tokenize("2023-02-29");
        assert_eq!(output.tokens[0].kind, TokenKind::Datetime);
        assert_eq!(output.tokens[0].descriptor, Some(TypeDescriptor::Invalid));
        assert_eq!(output.errors.len(), 1);
    }

    #[test]
    fn test_duration_tokens() {
        let output = tokenize("P1DT2H 30s 10ms");
        assert_eq!(output.tokens.len(), 3);
        assert!(output.tokens.iter().all(|t| t.kind == TokenKind::Duration));
        assert!(output.errors.is_empty());
    }

    #[test]
    fn test_duration_trailing_letters() {
        let output = tokenize("5mss");
        assert_eq!(output.tokens.len(), 1);
        assert_eq!(output.tokens[0].kind, TokenKind::Duration);
        assert_eq!(output.errors.len(), 1);
    }

    #[test]
    fn test_number_grouping_warning() {
        let output = tokenize("0x_1");
        assert_eq!(output.tokens[0].kind, TokenKind::Number);
        assert_eq!(output.tokens[0].descriptor, Some(TypeDescriptor::Integer));
        assert_eq!(output.warnings.len(), 1);
        assert!(output.errors.is_empty());

        let output = tokenize("1_234_567");
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_signed_non_decimal_number() {
        let output = tokenize("-0x10");
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].message, "sign is not allowed on a non-decimal number");
        assert_eq!(output.tokens[0].kind, TokenKind::Operator);
        assert_eq!(output.tokens[1].kind, TokenKind::Number);
    }

    #[test]
    fn test_sign_lexes_as_operator() {
        let output = tokenize("-5");
        assert_eq!(output.tokens.len(), 2);
        assert_eq!(output.tokens[0].kind, TokenKind::Operator);
        assert!(output.errors.is_empty());
    }

    #[test]
    fn test_nan_and_inf() {
        let output = tokenize("nan inf nankeen");
        assert_eq!(output.tokens[0].kind, TokenKind::Number);
        assert_eq!(output.tokens[1].kind, TokenKind::Number);
        assert_eq!(output.tokens[2].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_backtick_identifier() {
        let output = tokenize("`weird name`");
        assert_eq!(output.tokens.len(), 1);
        assert_eq!(output.tokens[0].kind, TokenKind::Identifier);
        assert_eq!(literal_content(&output.tokens[0].value), "weird name");
    }

    #[test]
    fn test_raw_tag_boundary() {
        let tag16 = "a".repeat(16);
        let output = tokenize(&format!("R\"{tag16}(x){tag16}\""));
        assert!(output.errors.is_empty());

        let tag17 = "a".repeat(17);
        let output = tokenize(&format!("R\"{tag17}(x){tag17}\""));
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].message, "raw literal tag is longer than 16 characters");
    }

    #[test]
    fn test_regions_cover_source_in_order() {
        let output = tokenize("config A {\n  x: string;\n}");
        let mut prev_end = Position::zero();
        for token in &output.tokens {
            assert!(token.region.start >= prev_end, "tokens out of order");
            assert!(token.region.start < token.region.end || token.region.is_empty());
            prev_end = token.region.end;
        }
    }

    #[test]
    fn test_token_positions() {
        let output = tokenize("config A {\n  x: string;\n}");
        let x = output.tokens.iter().find(|t| &*t.value == "x").unwrap();
        assert_eq!(x.region, Region::new(Position::new(1, 2), Position::new(1, 3)));
        let close = output.tokens.last().unwrap();
        assert_eq!(close.region.start, Position::new(2, 0));
    }
}
