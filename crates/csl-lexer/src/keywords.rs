//! Static keyword and character-class tables.

use phf::{phf_set, Set};

/// Reserved words of the schema language.
///
/// `*` is reserved too but never reaches word scanning; it lexes as the
/// single-character operator and the parser treats it as the wildcard key.
pub static RESERVED_KEYWORDS: Set<&'static str> = phf_set! {
    "config",
    "constraints",
    "requires",
    "conflicts",
    "with",
    "validate",
    "exists",
    "count_keys",
    "all_keys",
    "wildcard_keys",
    "subset",
};

/// Built-in primitive type names.
///
/// `any{}` and `any[]` are type keywords as well; they are produced by the
/// word scanner when `any` is immediately followed by `{}` or `[]`.
pub static PRIMITIVE_TYPES: Set<&'static str> = phf_set! {
    "string",
    "number",
    "boolean",
    "datetime",
    "duration",
};

/// Two-character operators, tried before single-character ones.
pub const TWO_CHAR_OPERATORS: &[&str] = &["==", "!=", "<=", ">=", "&&", "||", "<<", ">>"];

/// Characters permitted in a raw string or raw identifier tag.
pub(crate) fn is_raw_tag_char(ch: char) -> bool {
    matches!(ch,
        'a'..='z' | 'A'..='Z' | '0'..='9'
        | '!' | '"' | '#' | '%' | '&' | '\'' | '*' | '+' | ',' | '-' | '.' | '/'
        | ':' | ';' | '<' | '=' | '>' | '?' | '[' | ']' | '^' | '_' | '{' | '|' | '}' | '~')
}

/// Maximum raw tag length; a 17-character tag is an error.
pub const MAX_RAW_TAG_LEN: usize = 16;

/// Shorthand duration suffixes, longest first so `ms`/`mo` win over `m`.
pub const DURATION_SUFFIXES: &[&str] = &["ms", "mo", "y", "w", "d", "h", "m", "s"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_words() {
        assert!(RESERVED_KEYWORDS.contains("config"));
        assert!(RESERVED_KEYWORDS.contains("subset"));
        assert!(!RESERVED_KEYWORDS.contains("any"));
    }

    #[test]
    fn test_raw_tag_charset() {
        for ch in "abzAZ09!\"#%&'*+,-./:;<=>?[]^_{|}~".chars() {
            assert!(is_raw_tag_char(ch), "{ch:?} should be a tag char");
        }
        for ch in "( )\\$@`\n\t".chars() {
            assert!(!is_raw_tag_char(ch), "{ch:?} should not be a tag char");
        }
    }
}
