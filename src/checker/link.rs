// src/checker/link.rs
// =============================================================================
// The two value types every other part of the checker passes around:
//
// - LinkOccurrence: one link found in one document, with where it was found
// - Validity: what we concluded about that link
//
// Both are created once per run, never mutated, and thrown away after the
// results are printed.
//
// Rust concepts:
// - Enums without a default: every match on Validity must handle all four
//   cases, so forgetting one is a compile error
// - Derive macros: Serialize lets us print findings as JSON
// =============================================================================

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A 1-based (line, column) position inside a document.
///
/// Columns count characters, not bytes, so a link after an emoji still
/// lines up with what an editor shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

/// One link found inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkOccurrence {
    /// The document the link was found in
    pub source_file: PathBuf,
    /// The link target exactly as the markdown parser reported it
    pub link: String,
    /// Where the link target starts
    ///
    /// Reference-style links (`[text][ref]`, `[text][]`, `[text]`) keep their
    /// target in a separate definition, so for those `start` and `end` cover
    /// the `[text][ref]` syntax where the link is used.
    pub start: Position,
    /// Where the link target ends (never before `start`)
    pub end: Position,
}

// The outcome of checking a single link
//
// There is deliberately no `Default` and no "unchecked" variant: a link
// either has one of these four values or it has not been classified yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    /// Target exists on disk
    Valid,
    /// Target does not exist (a suggestion may be offered)
    Invalid,
    /// Target is a network URL; we never fetch those
    Unknown,
    /// Target is an absolute path or points at our own published site
    NonRelative,
}

impl Validity {
    /// True for the outcomes that should fail a CI run
    pub fn is_failure(self) -> bool {
        matches!(self, Validity::Invalid | Validity::NonRelative)
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Validity::Valid => "valid",
            Validity::Invalid => "invalid",
            Validity::Unknown => "unknown",
            Validity::NonRelative => "non-relative",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invalid_and_non_relative_fail() {
        assert!(Validity::Invalid.is_failure());
        assert!(Validity::NonRelative.is_failure());
        assert!(!Validity::Valid.is_failure());
        assert!(!Validity::Unknown.is_failure());
    }

    #[test]
    fn test_positions_order_by_line_then_column() {
        let a = Position { line: 1, col: 40 };
        let b = Position { line: 2, col: 1 };
        assert!(a < b);
        assert!(Position { line: 2, col: 3 } > b);
    }

    #[test]
    fn test_validity_serializes_snake_case() {
        let json = serde_json::to_string(&Validity::NonRelative).unwrap();
        assert_eq!(json, "\"non_relative\"");
    }
}
