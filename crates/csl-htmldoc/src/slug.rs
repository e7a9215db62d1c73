//! Slugs for page file names and key anchors.

/// Slugifies one path segment or name for use in file names and anchors.
///
/// Wildcard segments get stable words instead of punctuation; everything
/// else is lowercased with non-alphanumeric runs collapsed to single
/// hyphens.
pub(crate) fn slug(segment: &str) -> String {
    match segment {
        "*" => return "wildcard".to_string(),
        "*[]" => return "wildcard-array".to_string(),
        _ => {}
    }
    let mut out = String::with_capacity(segment.len());
    let mut pending_hyphen = false;
    for ch in segment.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    if out.is_empty() {
        out.push_str("unnamed");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names() {
        assert_eq!(slug("Services"), "services");
        assert_eq!(slug("x86_64"), "x86-64");
    }

    #[test]
    fn test_wildcard_segments() {
        assert_eq!(slug("*"), "wildcard");
        assert_eq!(slug("*[]"), "wildcard-array");
    }

    #[test]
    fn test_punctuation_collapses() {
        assert_eq!(slug("weird  name!"), "weird-name");
        assert_eq!(slug("--x--"), "x");
        assert_eq!(slug("!!!"), "unnamed");
    }
}
