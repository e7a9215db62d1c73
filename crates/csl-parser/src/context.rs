//! Token cursor with error accumulation for the parser.

use csl_span::{Diagnostic, Position, Region};
use csl_token::{Token, TokenKind};

/// Parser context: a cursor over the token slice plus accumulated
/// diagnostics. The parser never aborts; every miss is recorded and
/// parsing continues at the most plausible point.
pub(crate) struct Context<'t> {
    tokens: &'t [Token],
    pos: usize,
    pub(crate) errors: Vec<Diagnostic>,
    pub(crate) warnings: Vec<Diagnostic>,
}

impl<'t> Context<'t> {
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0, errors: Vec::new(), warnings: Vec::new() }
    }

    pub(crate) fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn peek(&self, offset: usize) -> Option<&'t Token> {
        self.tokens.get(self.pos + offset)
    }

    /// Index of the current token in the stream.
    pub(crate) fn index(&self) -> usize {
        self.pos
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Region of the current token, or an empty region at the end of the
    /// last token when the stream is exhausted.
    pub(crate) fn current_region(&self) -> Region {
        match self.current() {
            Some(token) => token.region,
            None => {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.region.end)
                    .unwrap_or_else(Position::zero);
                Region::empty(end)
            }
        }
    }

    /// End position of the most recently consumed token.
    pub(crate) fn previous_end(&self) -> Position {
        if self.pos == 0 {
            return Position::zero();
        }
        self.tokens[self.pos - 1].region.end
    }

    pub(crate) fn check(&self, kind: TokenKind, value: &str) -> bool {
        self.current().is_some_and(|t| t.is(kind, value))
    }

    pub(crate) fn check_kind(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|t| t.kind == kind)
    }

    pub(crate) fn consume(&mut self, kind: TokenKind, value: &str) -> bool {
        if self.check(kind, value) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the expected token or records an error at the offending
    /// token's region. Returns true when the token was present.
    pub(crate) fn expect(&mut self, kind: TokenKind, value: &str) -> bool {
        if self.consume(kind, value) {
            return true;
        }
        let found = self
            .current()
            .map(|t| format!("'{}'", t.value))
            .unwrap_or_else(|| "end of file".to_string());
        self.error(format!("expected '{value}', found {found}"), self.current_region());
        false
    }

    pub(crate) fn error(&mut self, message: impl Into<String>, region: Region) {
        self.errors.push(Diagnostic::error(message, region));
    }

    /// True when the current token plausibly begins a key definition or
    /// ends a table, which is where a missing `;` is tolerated.
    pub(crate) fn at_key_boundary(&self) -> bool {
        match self.current() {
            None => true,
            Some(t) => {
                t.kind == TokenKind::Identifier
                    || t.is(TokenKind::Punctuator, "}")
                    || t.is(TokenKind::Operator, "*")
                    || t.is(TokenKind::Keyword, "constraints")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csl_lexer::tokenize;

    #[test]
    fn test_expect_records_error_and_continues() {
        let output = tokenize("x y");
        let mut cx = Context::new(&output.tokens);
        assert!(!cx.expect(TokenKind::Punctuator, ";"));
        assert_eq!(cx.errors.len(), 1);
        assert!(cx.errors[0].message.contains("expected ';'"));
        // Cursor did not move.
        assert_eq!(cx.index(), 0);
    }

    #[test]
    fn test_current_region_at_eof() {
        let output = tokenize("x");
        let mut cx = Context::new(&output.tokens);
        cx.advance();
        let region = cx.current_region();
        assert!(region.is_empty());
        assert_eq!(region.start, output.tokens[0].region.end);
    }
}
