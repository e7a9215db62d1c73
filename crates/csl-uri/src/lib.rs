//! URI normalization for the language server's document cache.
//!
//! Clients are inconsistent about percent-encoding and Windows drive
//! letter casing, so every cache lookup goes through [`normalize_uri`]:
//! `file://` paths are percent-decoded, re-encoded with lowercase hex
//! keeping only unreserved characters, and drive letters are lowered.
//! Everything else (including `untitled:` buffers) is left untouched.
//!
//! The function is idempotent: normalizing a normalized URI is a no-op.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use url::Url;

/// Check if a URI uses the `file` scheme.
///
/// # Examples
///
/// ```
/// use csl_uri::is_file_uri;
///
/// assert!(is_file_uri("file:///tmp/app.csl"));
/// assert!(is_file_uri("FILE:///tmp/app.csl"));
/// assert!(!is_file_uri("untitled:Untitled-1"));
/// ```
pub fn is_file_uri(uri: &str) -> bool {
    Url::parse(uri).map(|u| u.scheme() == "file").unwrap_or(false)
}

/// Normalize a URI to a consistent cache key.
///
/// For `file://` URIs the path is percent-decoded and re-encoded so that
/// only unreserved characters (`A-Z a-z 0-9 - . _ ~`) and `/` stay
/// literal; every other byte becomes `%xx` with lowercase hex. A Windows
/// drive letter directly after the root (either `C:` or `C%3A`) is
/// lowercased along with its encoded colon. Host-less forms such as
/// `file:relative` and non-`file` schemes are returned unchanged.
///
/// # Examples
///
/// ```
/// use csl_uri::normalize_uri;
///
/// assert_eq!(normalize_uri("file:///tmp/app.csl"), "file:///tmp/app.csl");
/// assert_eq!(
///     normalize_uri("file:///C:/Users/app.csl"),
///     "file:///c%3a/Users/app.csl"
/// );
/// assert_eq!(normalize_uri("untitled:Untitled-1"), "untitled:Untitled-1");
/// ```
pub fn normalize_uri(uri: &str) -> String {
    if !is_file_uri(uri) {
        return uri.to_string();
    }
    let Some(rest) = uri.strip_prefix("file://") else {
        // `file:` without slashes has no authority; leave it alone.
        return uri.to_string();
    };
    let (authority, path) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, ""),
    };

    let decoded = percent_decode(path.as_bytes());
    let mut encoded = String::with_capacity(decoded.len());
    for byte in &decoded {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                encoded.push(*byte as char);
            }
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{byte:02x}"));
            }
        }
    }

    // Lowercase a Windows drive letter at the path root: `/C%3a/...`.
    let bytes = encoded.as_bytes();
    if bytes.len() >= 5
        && bytes[0] == b'/'
        && bytes[1].is_ascii_alphabetic()
        && &bytes[2..5] == b"%3a"
    {
        let mut fixed = String::with_capacity(encoded.len());
        fixed.push('/');
        fixed.push(bytes[1].to_ascii_lowercase() as char);
        fixed.push_str(&encoded[2..]);
        return format!("file://{authority}{fixed}");
    }

    format!("file://{authority}{encoded}")
}

/// Decodes `%xx` sequences; malformed escapes pass through literally.
fn percent_decode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if input[i] == b'%' && i + 2 < input.len() {
            let hex = |b: u8| (b as char).to_digit(16);
            if let (Some(hi), Some(lo)) = (hex(input[i + 1]), hex(input[i + 2])) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(input[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_path_unchanged() {
        assert_eq!(normalize_uri("file:///tmp/app.csl"), "file:///tmp/app.csl");
    }

    #[test]
    fn test_space_reencoded_lowercase() {
        assert_eq!(
            normalize_uri("file:///tmp/my%20dir/app.csl"),
            "file:///tmp/my%20dir/app.csl"
        );
        assert_eq!(
            normalize_uri("file:///tmp/my%2Fescaped"),
            "file:///tmp/my%2fescaped"
        );
    }

    #[test]
    fn test_windows_drive_letter_lowered() {
        assert_eq!(
            normalize_uri("file:///C:/Users/app.csl"),
            "file:///c%3a/Users/app.csl"
        );
        assert_eq!(
            normalize_uri("file:///C%3A/Users/app.csl"),
            "file:///c%3a/Users/app.csl"
        );
        assert_eq!(
            normalize_uri("file:///c%3a/Users/app.csl"),
            "file:///c%3a/Users/app.csl"
        );
    }

    #[test]
    fn test_idempotent() {
        for uri in [
            "file:///tmp/app.csl",
            "file:///C:/Users/My%20App/x.csl",
            "file:///tmp/caf%C3%A9.csl",
            "untitled:Untitled-1",
        ] {
            let once = normalize_uri(uri);
            assert_eq!(normalize_uri(&once), once);
        }
    }

    #[test]
    fn test_drive_letter_case_insensitive_key() {
        assert_eq!(
            normalize_uri("file:///C:/foo.csl"),
            normalize_uri("file:///c:/foo.csl")
        );
    }

    #[test]
    fn test_non_file_schemes_untouched() {
        assert_eq!(normalize_uri("untitled:Untitled-1"), "untitled:Untitled-1");
        assert_eq!(normalize_uri("not a uri"), "not a uri");
    }

    #[test]
    fn test_unicode_path_reencoded() {
        assert_eq!(
            normalize_uri("file:///tmp/caf%C3%A9.csl"),
            "file:///tmp/caf%c3%a9.csl"
        );
    }

    #[test]
    fn test_is_file_uri() {
        assert!(is_file_uri("file:///x"));
        assert!(!is_file_uri("https://example.com"));
        assert!(!is_file_uri("plain/path"));
    }
}
