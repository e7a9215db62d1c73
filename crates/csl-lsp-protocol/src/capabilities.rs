//! Server capability advertisement.

use serde_json::{json, Value};

/// Semantic token legend, in the fixed order clients must use to decode
/// token type indices.
pub const SEMANTIC_TOKEN_TYPES: [&str; 12] = [
    "datetime",
    "duration",
    "number",
    "boolean",
    "keyword",
    "type",
    "identifier",
    "punctuator",
    "operator",
    "comment",
    "string",
    "unknown",
];

/// Completion trigger characters: `.` for member access plus the leading
/// letters of keywords and built-in types.
pub const COMPLETION_TRIGGER_CHARACTERS: [&str; 12] =
    [".", "-", "c", "s", "n", "b", "d", "a", "w", "r", "v", "e"];

/// Characters that commit the selected completion item.
pub const COMPLETION_COMMIT_CHARACTERS: [&str; 7] = [".", "=", " ", "\"", "'", "]", "}"];

/// Builds the `capabilities` object for the `initialize` response.
pub fn server_capabilities() -> Value {
    json!({
        // 1 = full document sync
        "textDocumentSync": 1,
        "referencesProvider": true,
        "renameProvider": true,
        "foldingRangeProvider": true,
        "semanticTokensProvider": {
            "legend": {
                "tokenTypes": SEMANTIC_TOKEN_TYPES,
                "tokenModifiers": [],
            },
            "full": true,
        },
        "documentFormattingProvider": true,
        "definitionProvider": true,
        "completionProvider": {
            "triggerCharacters": COMPLETION_TRIGGER_CHARACTERS,
            "allCommitCharacters": COMPLETION_COMMIT_CHARACTERS,
            "resolveProvider": false,
        },
        "hoverProvider": true,
        "diagnosticProvider": {
            "interFileDependencies": false,
            "workspaceDiagnostics": false,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_order_is_fixed() {
        let caps = server_capabilities();
        let types = caps["semanticTokensProvider"]["legend"]["tokenTypes"]
            .as_array()
            .unwrap();
        assert_eq!(types[0], "datetime");
        assert_eq!(types[4], "keyword");
        assert_eq!(types[11], "unknown");
        assert_eq!(types.len(), 12);
    }

    #[test]
    fn test_full_sync_advertised() {
        let caps = server_capabilities();
        assert_eq!(caps["textDocumentSync"], 1);
        assert_eq!(caps["hoverProvider"], true);
        assert_eq!(caps["diagnosticProvider"]["workspaceDiagnostics"], false);
    }
}
