//! Number scanning and digit-grouping checks.

use crate::cursor::Cursor;
use csl_token::TypeDescriptor;

/// Outcome of a number scan.
pub(crate) struct NumberScan {
    pub descriptor: TypeDescriptor,
    /// False when any `_`-grouped digit run violates the grouping policy.
    pub grouping_reasonable: bool,
    /// Set when the literal has a base prefix but no digits.
    pub malformed: bool,
}

/// Checks one digit run for reasonable `_` grouping.
///
/// A run with no separators is always fine. With separators, either every
/// group has the same length of at least two, or all leading groups have
/// length two with a final group of three.
pub(crate) fn grouping_reasonable(run: &str) -> bool {
    if !run.contains('_') {
        return true;
    }
    let groups: Vec<&str> = run.split('_').collect();
    if groups.iter().any(|g| g.is_empty()) {
        return false;
    }
    let first_len = groups[0].len();
    let equal = first_len >= 2 && groups.iter().all(|g| g.len() == first_len);
    let last = groups.len() - 1;
    let thousands = groups[..last].iter().all(|g| g.len() == 2) && groups[last].len() == 3;
    equal || thousands
}

fn scan_digit_run<'a>(cursor: &mut Cursor<'a>, radix: u32) -> &'a str {
    let start = cursor.byte_offset();
    cursor.bump_while(|c| c.is_digit(radix) || c == '_');
    cursor.slice_from(start)
}

/// Scans a number at an ASCII digit.
///
/// Handles `0x`/`0o`/`0b` integers and decimal integers/floats with
/// optional fraction and exponent. Grouping violations are reported as a
/// flag, not by rejecting the literal.
pub(crate) fn scan_number(cursor: &mut Cursor<'_>) -> NumberScan {
    let mut runs: Vec<String> = Vec::new();

    let radix = if cursor.starts_with("0x") {
        Some(16)
    } else if cursor.starts_with("0o") {
        Some(8)
    } else if cursor.starts_with("0b") {
        Some(2)
    } else {
        None
    };

    if let Some(radix) = radix {
        cursor.bump();
        cursor.bump();
        let run = scan_digit_run(cursor, radix);
        let malformed = !run.chars().any(|c| c.is_digit(radix));
        let reasonable = grouping_reasonable(run);
        return NumberScan {
            descriptor: if malformed { TypeDescriptor::Invalid } else { TypeDescriptor::Integer },
            grouping_reasonable: reasonable,
            malformed,
        };
    }

    runs.push(scan_digit_run(cursor, 10).to_string());
    let mut is_float = false;

    if cursor.peek() == Some('.') && cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
        cursor.bump();
        is_float = true;
        runs.push(scan_digit_run(cursor, 10).to_string());
    }

    if matches!(cursor.peek(), Some('e') | Some('E')) {
        let before_exponent = cursor.clone();
        cursor.bump();
        if matches!(cursor.peek(), Some('+') | Some('-')) {
            cursor.bump();
        }
        if cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            runs.push(scan_digit_run(cursor, 10).to_string());
        } else {
            // `1e` followed by nothing numeric: the `e` is a separate word.
            *cursor = before_exponent;
        }
    }

    NumberScan {
        descriptor: if is_float { TypeDescriptor::Float } else { TypeDescriptor::Integer },
        grouping_reasonable: runs.iter().all(|run| grouping_reasonable(run)),
        malformed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> (NumberScan, usize) {
        let mut cursor = Cursor::new(input);
        let scan = scan_number(&mut cursor);
        let len = cursor.byte_offset();
        (scan, len)
    }

    #[test]
    fn test_plain_integer() {
        let (scan, len) = scan("0");
        assert_eq!(scan.descriptor, TypeDescriptor::Integer);
        assert!(scan.grouping_reasonable);
        assert_eq!(len, 1);
    }

    #[test]
    fn test_zero_dot_has_no_fraction() {
        // `0.` is not a float; the dot stays in the stream.
        let (scan, len) = scan("0.");
        assert_eq!(scan.descriptor, TypeDescriptor::Integer);
        assert_eq!(len, 1);
    }

    #[test]
    fn test_floats() {
        let (scan_result, len) = scan("3.25");
        assert_eq!(scan_result.descriptor, TypeDescriptor::Float);
        assert_eq!(len, 4);

        let (scan_result, len) = scan("1e9");
        assert_eq!(scan_result.descriptor, TypeDescriptor::Float);
        assert_eq!(len, 3);

        let (scan_result, len) = scan("2.5e-3");
        assert_eq!(scan_result.descriptor, TypeDescriptor::Float);
        assert_eq!(len, 6);
    }

    #[test]
    fn test_dangling_exponent_backtracks() {
        let (scan, len) = scan("1everything");
        assert_eq!(scan.descriptor, TypeDescriptor::Integer);
        assert_eq!(len, 1);
    }

    #[test]
    fn test_radix_prefixes() {
        let (scan_result, len) = scan("0xff");
        assert_eq!(scan_result.descriptor, TypeDescriptor::Integer);
        assert_eq!(len, 4);

        let (scan_result, _) = scan("0o755");
        assert_eq!(scan_result.descriptor, TypeDescriptor::Integer);

        let (scan_result, _) = scan("0b1010");
        assert_eq!(scan_result.descriptor, TypeDescriptor::Integer);
    }

    #[test]
    fn test_bare_prefix_is_malformed() {
        let (scan, len) = scan("0x");
        assert!(scan.malformed);
        assert_eq!(scan.descriptor, TypeDescriptor::Invalid);
        assert_eq!(len, 2);
    }

    #[test]
    fn test_grouping_policy() {
        assert!(grouping_reasonable("1234"));
        assert!(grouping_reasonable("12_34_56"));
        assert!(grouping_reasonable("123_456"));
        assert!(grouping_reasonable("12_34_567"));
        assert!(!grouping_reasonable("_1"));
        assert!(!grouping_reasonable("1_1"));
        assert!(!grouping_reasonable("1_234"));
        assert!(!grouping_reasonable("12_3456"));
    }

    #[test]
    fn test_hex_grouping_warning_case() {
        // `0x_1` stays a valid number but its grouping is unreasonable.
        let (scan, len) = scan("0x_1");
        assert!(!scan.malformed);
        assert!(!scan.grouping_reasonable);
        assert_eq!(len, 4);
    }
}
