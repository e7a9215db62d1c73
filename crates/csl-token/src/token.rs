//! Token type produced by the lexer and consumed by the parser.

use crate::TypeDescriptor;
use csl_span::Region;
use std::fmt;
use std::sync::Arc;

/// Token classification for CSL parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `// ...` line comment (present only when comments are preserved).
    Comment,
    /// Basic or raw string literal.
    String,
    /// ISO 8601 date, time, or combined datetime.
    Datetime,
    /// ISO 8601 or shorthand duration.
    Duration,
    /// Integer or float in any supported base, plus `nan`/`inf`.
    Number,
    /// `true` or `false`.
    Boolean,
    /// Reserved word (`config`, `constraints`, `requires`, ...).
    Keyword,
    /// Built-in type keyword (`string`, `number`, `any{}`, ...).
    Type,
    /// Bare, backtick-quoted, or raw-backtick identifier.
    Identifier,
    /// Operator such as `==`, `&&`, `.`, `@`.
    Operator,
    /// Punctuator such as `{`, `}`, `;`, `=>`.
    Punctuator,
    /// A run of characters the lexer could not classify.
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Comment => "comment",
            TokenKind::String => "string",
            TokenKind::Datetime => "datetime",
            TokenKind::Duration => "duration",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Keyword => "keyword",
            TokenKind::Type => "type",
            TokenKind::Identifier => "identifier",
            TokenKind::Operator => "operator",
            TokenKind::Punctuator => "punctuator",
            TokenKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Token produced by the lexer.
///
/// Stores the kind, original source text, an optional literal descriptor,
/// and the source region. The text is kept in an `Arc<str>` so the parser
/// and language server can clone tokens cheaply.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Original source text of the token.
    pub value: Arc<str>,
    /// Token classification for parser decision making.
    pub kind: TokenKind,
    /// Literal classification for string/number/datetime/duration/boolean tokens.
    pub descriptor: Option<TypeDescriptor>,
    /// Half-open source region covered by the token.
    pub region: Region,
}

impl Token {
    /// Creates a token without a literal descriptor.
    pub fn new(value: impl Into<Arc<str>>, kind: TokenKind, region: Region) -> Self {
        Token { value: value.into(), kind, descriptor: None, region }
    }

    /// Creates a literal token with its descriptor.
    pub fn with_descriptor(
        value: impl Into<Arc<str>>,
        kind: TokenKind,
        descriptor: TypeDescriptor,
        region: Region,
    ) -> Self {
        Token { value: value.into(), kind, descriptor: Some(descriptor), region }
    }

    /// True if the token is the given operator or punctuator text.
    pub fn is(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && &*self.value == value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csl_span::{Position, Region};

    fn region(cols: std::ops::Range<u32>) -> Region {
        Region::new(Position::new(0, cols.start), Position::new(0, cols.end))
    }

    #[test]
    fn test_token_is() {
        let token = Token::new("{", TokenKind::Punctuator, region(0..1));
        assert!(token.is(TokenKind::Punctuator, "{"));
        assert!(!token.is(TokenKind::Operator, "{"));
        assert!(!token.is(TokenKind::Punctuator, "}"));
    }

    #[test]
    fn test_descriptor_attachment() {
        let token = Token::with_descriptor(
            "42",
            TokenKind::Number,
            TypeDescriptor::Integer,
            region(0..2),
        );
        assert_eq!(token.descriptor, Some(TypeDescriptor::Integer));
    }
}
