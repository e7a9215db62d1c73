//! Accumulated diagnostics produced by the lexer and parser.

use crate::Region;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity, numbered per the LSP `DiagnosticSeverity` scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A hard problem in the input. Severity 1 on the wire.
    Error = 1,
    /// A questionable construct that still lexes/parses. Severity 2 on the wire.
    Warning = 2,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// A single lexer or parser diagnostic.
///
/// Diagnostics accumulate in emission order; neither the lexer nor the
/// parser aborts on the first problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Human-readable message.
    pub message: String,
    /// Source region the message refers to.
    pub region: Region,
    /// Error or warning.
    pub severity: Severity,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    pub fn error(message: impl Into<String>, region: Region) -> Self {
        Self { message: message.into(), region, severity: Severity::Error }
    }

    /// Creates a warning diagnostic.
    pub fn warning(message: impl Into<String>, region: Region) -> Self {
        Self { message: message.into(), region, severity: Severity::Warning }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (line {}, col {}): {}",
            self.severity, self.region.start.line, self.region.start.column, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_display_matches_cli_format() {
        let diag = Diagnostic::error(
            "unexpected token",
            Region::new(Position::new(3, 7), Position::new(3, 9)),
        );
        assert_eq!(diag.to_string(), "Error (line 3, col 7): unexpected token");

        let warn = Diagnostic::warning(
            "digit grouping is not reasonable",
            Region::new(Position::new(0, 0), Position::new(0, 5)),
        );
        assert!(warn.to_string().starts_with("Warning (line 0, col 0)"));
    }

    #[test]
    fn test_severity_wire_numbers() {
        assert_eq!(Severity::Error as i32, 1);
        assert_eq!(Severity::Warning as i32, 2);
    }
}
