// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - link: the LinkOccurrence and Validity types shared by everything else
// - markdown: extracts links (with line/column positions) from markdown text
// - validity: decides whether a link is Valid, Invalid, Unknown or NonRelative
// - suggest: finds the closest existing path for a broken link
// - relative: rewrites absolute links into relative ones
//
// The pieces are independent of each other: classification never asks for a
// suggestion, and the caller decides when to use `suggest` or `relative`.
// =============================================================================

mod link;
mod markdown;
mod relative;
mod suggest;
mod validity;

// Re-export public items from submodules
// This lets users write `checker::classify()` instead of
// `checker::validity::classify()`
pub use link::{LinkOccurrence, Position, Validity};
pub use markdown::Document;
pub use relative::relative_replacement;
pub use suggest::{suggest, SUGGEST_MIN_DISTANCE};
pub use validity::classify;
