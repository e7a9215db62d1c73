//! ISO 8601 and shorthand duration scanning.

use crate::cursor::Cursor;
use crate::keywords::DURATION_SUFFIXES;

/// Outcome of a duration scan; `errors` covers the whole token region.
pub(crate) struct DurationScan {
    pub errors: Vec<&'static str>,
}

fn scan_component_number(cursor: &mut Cursor<'_>, allow_fraction: bool) -> bool {
    if !cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }
    cursor.bump_while(|c| c.is_ascii_digit());
    if allow_fraction
        && cursor.peek() == Some('.')
        && cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit())
    {
        cursor.bump();
        cursor.bump_while(|c| c.is_ascii_digit());
    }
    true
}

/// Consumes any trailing alphabetic run, which is invalid after a duration.
fn check_trailing_letters(cursor: &mut Cursor<'_>, errors: &mut Vec<&'static str>) {
    if cursor.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
        cursor.bump_while(|c| c.is_ascii_alphanumeric() || c == '_');
        errors.push("duration has trailing characters");
    }
}

/// Attempts to scan `P[nY][nM][nW][nD][T[nH][nM][nS]]` at a `P`.
///
/// Returns `None` (cursor restored) when no component follows the `P`, so
/// identifiers like `Price` or a bare `P` lex normally.
pub(crate) fn try_scan_iso_duration(cursor: &mut Cursor<'_>) -> Option<DurationScan> {
    let save = cursor.clone();
    if cursor.peek() != Some('P') {
        return None;
    }
    cursor.bump();

    let mut errors = Vec::new();
    let mut components = 0usize;

    // Date designators, in order.
    for designator in ['Y', 'M', 'W', 'D'] {
        let attempt = cursor.clone();
        if scan_component_number(cursor, false) && cursor.peek() == Some(designator) {
            cursor.bump();
            components += 1;
        } else {
            *cursor = attempt;
        }
    }

    // Time designators after `T`.
    if cursor.peek() == Some('T') {
        let before_t = cursor.clone();
        cursor.bump();
        let mut time_components = 0usize;
        for designator in ['H', 'M', 'S'] {
            let attempt = cursor.clone();
            let allow_fraction = designator == 'S';
            if scan_component_number(cursor, allow_fraction) && cursor.peek() == Some(designator) {
                cursor.bump();
                time_components += 1;
            } else {
                *cursor = attempt;
            }
        }
        if time_components == 0 {
            // A dangling `T` is not part of the duration.
            *cursor = before_t;
        } else {
            components += time_components;
        }
    }

    if components == 0 {
        *cursor = save;
        return None;
    }
    check_trailing_letters(cursor, &mut errors);
    Some(DurationScan { errors })
}

/// Attempts to consume a shorthand suffix (`y mo w d h m s ms`) after a
/// number. Returns the scan when a suffix was present.
pub(crate) fn try_scan_shorthand_suffix(cursor: &mut Cursor<'_>) -> Option<DurationScan> {
    let suffix = DURATION_SUFFIXES.iter().find(|s| cursor.starts_with(s))?;
    // `m` must not shadow a longer identifier-ish run unless the run is
    // exactly the suffix; trailing letters are consumed and flagged below.
    for _ in 0..suffix.len() {
        cursor.bump();
    }
    let mut errors = Vec::new();
    check_trailing_letters(cursor, &mut errors);
    Some(DurationScan { errors })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(input: &str) -> Option<(Vec<&'static str>, usize)> {
        let mut cursor = Cursor::new(input);
        try_scan_iso_duration(&mut cursor).map(|scan| (scan.errors, cursor.byte_offset()))
    }

    #[test]
    fn test_iso_durations() {
        let (errors, len) = iso("P1Y2M3D").unwrap();
        assert!(errors.is_empty());
        assert_eq!(len, 7);

        let (errors, len) = iso("PT5M").unwrap();
        assert!(errors.is_empty());
        assert_eq!(len, 4);

        let (errors, len) = iso("P1DT2H30M").unwrap();
        assert!(errors.is_empty());
        assert_eq!(len, 9);

        let (errors, _) = iso("PT0.5S").unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_iso_rejects_bare_p() {
        assert!(iso("P").is_none());
        assert!(iso("PT").is_none());
        assert!(iso("Price").is_none());
    }

    #[test]
    fn test_trailing_letters_flagged() {
        let (errors, len) = iso("P1DX").unwrap();
        assert_eq!(errors, vec!["duration has trailing characters"]);
        assert_eq!(len, 4);
    }

    #[test]
    fn test_shorthand_suffixes() {
        let mut cursor = Cursor::new("ms rest");
        let scan = try_scan_shorthand_suffix(&mut cursor).unwrap();
        assert!(scan.errors.is_empty());
        assert_eq!(cursor.byte_offset(), 2);

        let mut cursor = Cursor::new("mo");
        assert!(try_scan_shorthand_suffix(&mut cursor).is_some());

        let mut cursor = Cursor::new("x");
        assert!(try_scan_shorthand_suffix(&mut cursor).is_none());
    }

    #[test]
    fn test_shorthand_trailing_letters() {
        let mut cursor = Cursor::new("months");
        let scan = try_scan_shorthand_suffix(&mut cursor).unwrap();
        assert_eq!(scan.errors, vec!["duration has trailing characters"]);
        assert_eq!(cursor.byte_offset(), 6);
    }
}
