//! String and quoted-identifier scanning.

use crate::cursor::Cursor;
use crate::escape::scan_escape;
use crate::keywords::{is_raw_tag_char, MAX_RAW_TAG_LEN};
use csl_span::Region;
use memchr::memmem;

/// Outcome of scanning a basic `"..."` string or backtick identifier body.
pub(crate) struct QuotedScan {
    pub closed: bool,
    pub has_newline: bool,
    pub errors: Vec<(&'static str, Region)>,
}

fn is_forbidden_control(ch: char, allow_whitespace_controls: bool) -> bool {
    if allow_whitespace_controls && matches!(ch, '\t' | '\n' | '\r') {
        return false;
    }
    matches!(ch, '\u{0000}'..='\u{0008}' | '\u{000b}'..='\u{001f}' | '\u{007f}')
        || matches!(ch, '\t' | '\r')
}

/// Scans a basic quoted literal after its opening quote was consumed.
///
/// An unterminated literal glues the following source lines and keeps
/// scanning; only EOF without the closing quote reports it unclosed.
/// Literal newlines mark the multi-line variant; other control characters
/// must arrive escaped.
pub(crate) fn scan_basic_quoted(cursor: &mut Cursor<'_>, quote: char) -> QuotedScan {
    let mut scan = QuotedScan { closed: false, has_newline: false, errors: Vec::new() };
    let mut reported_control = false;
    loop {
        let at = cursor.position();
        match cursor.peek() {
            None => break,
            Some(ch) if ch == quote => {
                cursor.bump();
                scan.closed = true;
                break;
            }
            Some('\\') => {
                cursor.bump();
                let escape = scan_escape(cursor);
                if let Some(message) = escape.error {
                    scan.errors.push((message, Region::new(at, cursor.position())));
                }
            }
            Some('\n') => {
                scan.has_newline = true;
                cursor.bump();
            }
            Some(ch) => {
                cursor.bump();
                if is_forbidden_control(ch, false) && !reported_control {
                    reported_control = true;
                    scan.errors.push((
                        "control character must be escaped",
                        Region::new(at, cursor.position()),
                    ));
                }
            }
        }
    }
    scan
}

/// Outcome of scanning a raw `R"tag(...)tag"` literal.
pub(crate) struct RawScan {
    pub closed: bool,
    pub has_newline: bool,
    pub tag_too_long: bool,
    pub errors: Vec<(&'static str, Region)>,
}

/// Attempts to scan a raw literal at the `R`. Restores the cursor and
/// returns `None` when the shape does not match, so `R` lexes as an
/// identifier and the quote as an ordinary literal.
pub(crate) fn try_scan_raw(cursor: &mut Cursor<'_>, quote: char, input: &str) -> Option<RawScan> {
    let save = cursor.clone();
    cursor.bump(); // R
    cursor.bump(); // quote

    let tag_start = cursor.byte_offset();
    loop {
        match cursor.peek() {
            Some('(') => break,
            Some(ch) if is_raw_tag_char(ch) => {
                cursor.bump();
            }
            _ => {
                *cursor = save;
                return None;
            }
        }
    }
    let tag = cursor.slice_from(tag_start).to_string();
    let tag_too_long = tag.chars().count() > MAX_RAW_TAG_LEN;
    cursor.bump(); // (

    let mut scan =
        RawScan { closed: false, has_newline: false, tag_too_long, errors: Vec::new() };
    let mut reported_control = false;

    let mut closer = String::with_capacity(tag.len() + 2);
    closer.push(')');
    closer.push_str(&tag);
    closer.push(quote);

    let rest = &input.as_bytes()[cursor.byte_offset()..];
    let content_len = memmem::find(rest, closer.as_bytes());
    let content_end = content_len.map(|len| cursor.byte_offset() + len);

    while let Some(ch) = cursor.peek() {
        if Some(cursor.byte_offset()) == content_end {
            break;
        }
        let at = cursor.position();
        cursor.bump();
        if ch == '\n' {
            scan.has_newline = true;
        } else if is_forbidden_control(ch, true) && !reported_control {
            reported_control = true;
            scan.errors
                .push(("control character is not allowed", Region::new(at, cursor.position())));
        }
    }

    if content_end.is_some() {
        for _ in 0..closer.chars().count() {
            cursor.bump();
        }
        scan.closed = true;
    }
    Some(scan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(input: &str) -> (QuotedScan, usize) {
        let mut cursor = Cursor::new(input);
        cursor.bump(); // opening quote
        let scan = scan_basic_quoted(&mut cursor, '"');
        (scan, cursor.byte_offset())
    }

    #[test]
    fn test_simple_string() {
        let (scan, len) = basic("\"abc\" rest");
        assert!(scan.closed);
        assert!(!scan.has_newline);
        assert!(scan.errors.is_empty());
        assert_eq!(len, 5);
    }

    #[test]
    fn test_escaped_quote_does_not_close() {
        let (scan, len) = basic(r#""a\"b""#);
        assert!(scan.closed);
        assert_eq!(len, 6);
    }

    #[test]
    fn test_multiline_glues() {
        let (scan, _) = basic("\"abc\ndef\"");
        assert!(scan.closed);
        assert!(scan.has_newline);
    }

    #[test]
    fn test_unclosed_reaches_eof() {
        let (scan, len) = basic("\"abc");
        assert!(!scan.closed);
        assert_eq!(len, 4);
    }

    #[test]
    fn test_control_character_reported_once() {
        let (scan, _) = basic("\"a\tb\tc\"");
        assert_eq!(scan.errors.len(), 1);
        assert_eq!(scan.errors[0].0, "control character must be escaped");
    }

    fn raw(input: &str) -> Option<(RawScan, usize)> {
        let mut cursor = Cursor::new(input);
        try_scan_raw(&mut cursor, '"', input).map(|scan| (scan, cursor.byte_offset()))
    }

    #[test]
    fn test_raw_string() {
        let (scan, len) = raw(r#"R"x(a\b)x" rest"#).unwrap();
        assert!(scan.closed);
        assert!(!scan.tag_too_long);
        assert_eq!(len, 10);
    }

    #[test]
    fn test_raw_empty_tag() {
        let (scan, len) = raw(r#"R"(hi)""#).unwrap();
        assert!(scan.closed);
        assert_eq!(len, 7);
    }

    #[test]
    fn test_raw_multiline() {
        let (scan, _) = raw("R\"t(a\nb)t\"").unwrap();
        assert!(scan.closed);
        assert!(scan.has_newline);
    }

    #[test]
    fn test_raw_tag_lengths() {
        let tag16 = "a".repeat(16);
        let input = format!("R\"{tag16}(x){tag16}\"");
        let (scan, _) = raw(&input).unwrap();
        assert!(scan.closed);
        assert!(!scan.tag_too_long);

        let tag17 = "a".repeat(17);
        let input = format!("R\"{tag17}(x){tag17}\"");
        let (scan, _) = raw(&input).unwrap();
        assert!(scan.tag_too_long);
    }

    #[test]
    fn test_not_raw_backtracks() {
        assert!(raw("R\"tag with space(x)\"").is_none());
        let mut cursor = Cursor::new("R\"tag with space(x)\"");
        let result = try_scan_raw(&mut cursor, '"', "R\"tag with space(x)\"");
        assert!(result.is_none());
        assert_eq!(cursor.byte_offset(), 0);
    }

    #[test]
    fn test_raw_unclosed() {
        let (scan, len) = raw(r#"R"t(abc"#).unwrap();
        assert!(!scan.closed);
        assert_eq!(len, 7);
    }

    #[test]
    fn test_nested_delimiter_needs_matching_tag() {
        // `)x"` inside content only closes with the right tag.
        let (scan, _) = raw(r#"R"ab(content )a" more)ab""#).unwrap();
        assert!(scan.closed);
    }
}
