//! Line-based text edits between a document and its canonical rendering.

use csl_span::{WirePosition, WireRange};
use serde::Serialize;

/// One replacement edit in LSP shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    /// Range to replace in the current document.
    pub range: WireRange,
    /// Replacement text.
    #[serde(rename = "newText")]
    pub new_text: String,
}

/// Computes line-granular edits transforming `old` into `new`.
///
/// Common leading and trailing lines are kept; the differing middle block
/// becomes a single replacement edit, so a formatting pass stays
/// reviewable as one hunk per run.
pub fn line_edits(old: &str, new: &str) -> Vec<TextEdit> {
    if old == new {
        return Vec::new();
    }
    let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
    let new_lines: Vec<&str> = new.split_inclusive('\n').collect();

    let mut prefix = 0;
    while prefix < old_lines.len()
        && prefix < new_lines.len()
        && old_lines[prefix] == new_lines[prefix]
    {
        prefix += 1;
    }

    let mut suffix = 0;
    while suffix < old_lines.len() - prefix
        && suffix < new_lines.len() - prefix
        && old_lines[old_lines.len() - 1 - suffix] == new_lines[new_lines.len() - 1 - suffix]
    {
        suffix += 1;
    }

    let replacement: String =
        new_lines[prefix..new_lines.len() - suffix].concat();

    // The replaced region runs from the start of the first differing line
    // to the start of the first common suffix line. When the suffix is
    // empty the end points one line past the last, which LSP clamps.
    let end_line = old_lines.len() - suffix;
    let end = if suffix == 0 {
        // Replace through the very end of the document.
        let last = old_lines.last().copied().unwrap_or("");
        if last.ends_with('\n') {
            WirePosition::new(old_lines.len() as u32, 0)
        } else {
            WirePosition::new(
                (old_lines.len() - 1) as u32,
                last.chars().count() as u32,
            )
        }
    } else {
        WirePosition::new(end_line as u32, 0)
    };

    vec![TextEdit {
        range: WireRange::new(WirePosition::new(prefix as u32, 0), end),
        new_text: replacement,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identical_documents_produce_no_edits() {
        assert_eq!(line_edits("a\nb\n", "a\nb\n"), Vec::new());
    }

    #[test]
    fn test_middle_change() {
        let edits = line_edits("a\nb\nc\n", "a\nX\nc\n");
        assert_eq!(edits.len(), 1);
        let edit = &edits[0];
        assert_eq!(edit.range.start, WirePosition::new(1, 0));
        assert_eq!(edit.range.end, WirePosition::new(2, 0));
        assert_eq!(edit.new_text, "X\n");
    }

    #[test]
    fn test_insertion_at_end() {
        let edits = line_edits("a\n", "a\nb\n");
        assert_eq!(edits.len(), 1);
        let edit = &edits[0];
        assert_eq!(edit.range.start, WirePosition::new(1, 0));
        assert_eq!(edit.new_text, "b\n");
    }

    #[test]
    fn test_document_without_trailing_newline() {
        let edits = line_edits("a\nb", "a\nc\n");
        assert_eq!(edits.len(), 1);
        let edit = &edits[0];
        assert_eq!(edit.range.start, WirePosition::new(1, 0));
        assert_eq!(edit.range.end, WirePosition::new(1, 1));
        assert_eq!(edit.new_text, "c\n");
    }

    #[test]
    fn test_full_rewrite() {
        let edits = line_edits("x\ny\n", "p\nq\nr\n");
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].range.start, WirePosition::new(0, 0));
        assert_eq!(edits[0].new_text, "p\nq\nr\n");
    }
}
