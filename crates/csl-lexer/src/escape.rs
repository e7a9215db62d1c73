//! Escape sequence handling for basic strings and backtick identifiers.

use crate::cursor::Cursor;

/// Result of scanning one escape sequence (after the backslash).
pub(crate) struct ScannedEscape {
    /// Decoded content, already pushed through `char::from_u32` checks.
    pub decoded: Option<char>,
    /// Error message when the sequence is malformed.
    pub error: Option<&'static str>,
}

fn simple_escape(ch: char) -> Option<char> {
    Some(match ch {
        'a' => '\x07',
        'b' => '\x08',
        't' => '\t',
        'n' => '\n',
        'v' => '\x0b',
        'f' => '\x0c',
        'r' => '\r',
        '"' => '"',
        '\'' => '\'',
        '?' => '?',
        '\\' => '\\',
        '`' => '`',
        _ => return None,
    })
}

/// Scans the escape body following a consumed `\`.
///
/// Unknown single-character escapes decode to the character itself without
/// a diagnostic; malformed numeric escapes produce an error message.
pub(crate) fn scan_escape(cursor: &mut Cursor<'_>) -> ScannedEscape {
    let Some(ch) = cursor.bump() else {
        return ScannedEscape { decoded: None, error: Some("escape sequence is not finished") };
    };

    if let Some(decoded) = simple_escape(ch) {
        return ScannedEscape { decoded: Some(decoded), error: None };
    }

    match ch {
        '0'..='7' => {
            let mut value = ch as u32 - '0' as u32;
            for _ in 0..2 {
                match cursor.peek() {
                    Some(d @ '0'..='7') => {
                        cursor.bump();
                        value = value * 8 + (d as u32 - '0' as u32);
                    }
                    _ => break,
                }
            }
            match char::from_u32(value) {
                Some(decoded) => ScannedEscape { decoded: Some(decoded), error: None },
                None => ScannedEscape { decoded: None, error: Some("invalid octal escape") },
            }
        }
        'x' => scan_hex_escape(cursor, None),
        'u' => scan_hex_escape(cursor, Some(4)),
        'U' => scan_hex_escape(cursor, Some(8)),
        // Unknown escape \c produces c.
        other => ScannedEscape { decoded: Some(other), error: None },
    }
}

fn scan_hex_escape(cursor: &mut Cursor<'_>, exact: Option<usize>) -> ScannedEscape {
    let mut value: u32 = 0;
    let mut count = 0usize;
    let limit = exact.unwrap_or(6);
    while count < limit {
        match cursor.peek().and_then(|c| c.to_digit(16)) {
            Some(digit) => {
                cursor.bump();
                value = value.saturating_mul(16).saturating_add(digit);
                count += 1;
            }
            None => break,
        }
    }
    let complete = match exact {
        Some(n) => count == n,
        None => count > 0,
    };
    if !complete {
        return ScannedEscape { decoded: None, error: Some("invalid hex escape") };
    }
    match char::from_u32(value) {
        Some(decoded) => ScannedEscape { decoded: Some(decoded), error: None },
        None => ScannedEscape { decoded: None, error: Some("escape is not a valid character") },
    }
}

/// Decodes the content of a basic quoted literal body (no delimiters).
///
/// Used by the parser and printer to recover the meaning of string and
/// backtick-identifier tokens; lexing already reported any malformed
/// escapes, so errors decode to nothing here.
pub fn decode_escapes(body: &str) -> String {
    let mut cursor = Cursor::new(body);
    let mut out = String::with_capacity(body.len());
    while let Some(ch) = cursor.peek() {
        if ch == '\\' {
            cursor.bump();
            if let Some(decoded) = scan_escape(&mut cursor).decoded {
                out.push(decoded);
            }
        } else {
            cursor.bump();
            out.push(ch);
        }
    }
    out
}

/// Extracts the decoded content of a string or identifier token's source
/// text: strips quotes/backticks and resolves escapes, or strips the
/// `R"tag(`/`)tag"` frame of raw forms without touching the body.
pub fn literal_content(text: &str) -> String {
    let raw = text.strip_prefix('R');
    let (body, is_raw) = match raw {
        Some(rest) => (rest, true),
        None => (text, false),
    };
    let Some(quote) = body.chars().next().filter(|c| *c == '"' || *c == '`') else {
        // Bare identifier or malformed literal: take it verbatim.
        return text.to_string();
    };
    let inner = &body[quote.len_utf8()..];
    let inner = inner.strip_suffix(quote).unwrap_or(inner);
    if is_raw {
        // R"tag( ... )tag"
        let Some(open) = inner.find('(') else { return inner.to_string() };
        let tag = &inner[..open];
        let content = &inner[open + 1..];
        let closer = format!("){tag}");
        content.strip_suffix(closer.as_str()).unwrap_or(content).to_string()
    } else {
        decode_escapes(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_escapes() {
        assert_eq!(decode_escapes(r"a\tb\nc"), "a\tb\nc");
        assert_eq!(decode_escapes(r#"\"\\"#), "\"\\");
        assert_eq!(decode_escapes(r"\`"), "`");
    }

    #[test]
    fn test_unknown_escape_produces_char() {
        assert_eq!(decode_escapes(r"\c"), "c");
        assert_eq!(decode_escapes(r"\z"), "z");
    }

    #[test]
    fn test_numeric_escapes() {
        assert_eq!(decode_escapes(r"\101"), "A");
        assert_eq!(decode_escapes(r"\x41"), "A");
        assert_eq!(decode_escapes(r"A"), "A");
        assert_eq!(decode_escapes(r"\U0001F600"), "\u{1F600}");
    }

    #[test]
    fn test_octal_stops_at_three_digits() {
        assert_eq!(decode_escapes(r"\1014"), "A4");
    }

    #[test]
    fn test_literal_content_basic() {
        assert_eq!(literal_content(r#""dev""#), "dev");
        assert_eq!(literal_content(r#""a\tb""#), "a\tb");
        assert_eq!(literal_content("`weird name`"), "weird name");
    }

    #[test]
    fn test_literal_content_raw() {
        assert_eq!(literal_content(r#"R"x(a\b)x""#), r"a\b");
        assert_eq!(literal_content(r#"R"(plain)""#), "plain");
        assert_eq!(literal_content("R`t(id)t`"), "id");
    }

    #[test]
    fn test_literal_content_bare() {
        assert_eq!(literal_content("plain_ident"), "plain_ident");
    }
}
