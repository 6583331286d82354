// src/repo/mod.rs
// =============================================================================
// This module answers two questions about the repository being checked:
//
// - Which documents should we read?         (discover: glob patterns)
// - Which paths could a link point at?       (tracked_files: git ls-files)
//
// Neither is part of link checking itself; they only feed it inputs.
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod discover;
mod git;

pub use discover::discover;
pub use git::tracked_files;
