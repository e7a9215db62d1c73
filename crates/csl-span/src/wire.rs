//! LSP wire types for Position and Range.
//!
//! CSL positions are already 0-based line/column pairs, so the conversion
//! to the LSP wire shape is a field rename rather than a recomputation.

use crate::{Position, Region};
use serde::{Deserialize, Serialize};

/// LSP `Position`: 0-based line and character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WirePosition {
    /// 0-based line number.
    pub line: u32,
    /// 0-based character offset within the line.
    pub character: u32,
}

impl WirePosition {
    /// Creates a wire position.
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl From<Position> for WirePosition {
    fn from(p: Position) -> Self {
        Self { line: p.line, character: p.column }
    }
}

impl From<WirePosition> for Position {
    fn from(p: WirePosition) -> Self {
        Self { line: p.line, column: p.character }
    }
}

/// LSP `Range`: half-open start/end pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WireRange {
    /// Start position (inclusive).
    pub start: WirePosition,
    /// End position (exclusive).
    pub end: WirePosition,
}

impl WireRange {
    /// Creates a wire range.
    pub fn new(start: WirePosition, end: WirePosition) -> Self {
        Self { start, end }
    }

    /// An empty range at the given position.
    pub fn empty(pos: WirePosition) -> Self {
        Self { start: pos, end: pos }
    }
}

impl From<Region> for WireRange {
    fn from(r: Region) -> Self {
        Self { start: r.start.into(), end: r.end.into() }
    }
}

impl From<WireRange> for Region {
    fn from(r: WireRange) -> Self {
        Self { start: r.start.into(), end: r.end.into() }
    }
}

/// LSP `Location`: a URI plus a range inside the referenced document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireLocation {
    /// Document URI.
    pub uri: String,
    /// Range within the document.
    pub range: WireRange,
}

impl WireLocation {
    /// Creates a wire location.
    pub fn new(uri: String, range: WireRange) -> Self {
        Self { uri, range }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_round_trip() {
        let region = Region::new(Position::new(2, 4), Position::new(3, 0));
        let wire: WireRange = region.into();
        assert_eq!(wire.start, WirePosition::new(2, 4));
        assert_eq!(wire.end, WirePosition::new(3, 0));
        let back: Region = wire.into();
        assert_eq!(back, region);
    }

    #[test]
    fn test_serialize_shape() {
        let wire = WireRange::new(WirePosition::new(0, 1), WirePosition::new(0, 5));
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["start"]["line"], 0);
        assert_eq!(json["start"]["character"], 1);
        assert_eq!(json["end"]["character"], 5);
    }
}
