// src/checker/suggest.rs
// =============================================================================
// This module proposes a fix for a broken link: the tracked file whose path
// is closest to what the author typed.
//
// "Closest" means the smallest Levenshtein edit distance (insert, delete or
// replace one character, each costing 1). The comparison is literal: case
// and path separators are not normalized, so "Docs/A.md" and "docs/a.md"
// are two edits apart.
//
// The ranker always returns its best candidate with the raw distance. Whether
// that candidate is good enough to show ("Did you mean ...?") is up to the
// caller, usually by comparing against SUGGEST_MIN_DISTANCE.
//
// Rust concepts:
// - Lifetimes: a Suggestion borrows its candidate from the caller's list
// - Option: "no candidates" is None, not an error
// =============================================================================

use tracing::trace;

use super::link::LinkOccurrence;

/// Largest edit distance at which a suggestion is still worth showing
pub const SUGGEST_MIN_DISTANCE: usize = 5;

/// The best candidate found for a broken link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion<'a> {
    /// One of the paths from the candidate list
    pub candidate: &'a str,
    /// Edit distance between the link text and `candidate`
    pub distance: usize,
}

impl Suggestion<'_> {
    pub fn is_within(&self, max_distance: usize) -> bool {
        self.distance <= max_distance
    }
}

// Finds the candidate path closest to a broken link
//
// Parameters:
//   occurrence: the broken link (its text is what gets compared)
//   candidates: every path a link could point at, in a stable order
//
// Returns: the candidate with the smallest distance, the earliest one on a
// tie, or None when `candidates` is empty
//
// Example:
//   link "./presnt.md", candidates ["present.md"] -> ("present.md", 3)
pub fn suggest<'a>(occurrence: &LinkOccurrence, candidates: &'a [String]) -> Option<Suggestion<'a>> {
    let link: Vec<char> = occurrence.link.chars().collect();
    let mut best: Option<Suggestion<'a>> = None;

    for candidate in candidates {
        if let Some(current) = best {
            if current.distance == 0 {
                break;
            }
            // The distance is at least the length difference, so this
            // candidate can at best tie, and ties go to the earlier one.
            if link.len().abs_diff(candidate.chars().count()) >= current.distance {
                continue;
            }
        }

        let target: Vec<char> = candidate.chars().collect();
        let distance = levenshtein(&link, &target);
        if best.map_or(true, |current| distance < current.distance) {
            best = Some(Suggestion {
                candidate: candidate.as_str(),
                distance,
            });
        }
    }

    trace!(
        "Best match for {} in {}: {:?}",
        occurrence.link,
        occurrence.source_file.display(),
        best
    );
    best
}

// Classic dynamic programming table, keeping only two rows at a time
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, a_char) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_char) in b.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
