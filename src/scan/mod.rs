// src/scan/mod.rs
// =============================================================================
// This module walks a list of markdown files and checks every link in them.
//
// Features:
// - Files are handled one at a time, in the order they were given
// - Links come out in the order they appear in each file
// - Results are produced lazily as a Stream, so a caller can stop early
// - A file that cannot be read is logged and skipped
// - check_links ties it together with discovery, suggestions and findings
//
// Rust concepts:
// - Streams: the async version of an iterator
// - Re-exports: callers only need `scan::link_stream`
// =============================================================================

mod check;
mod stream;

// Re-export the main scanning functions
pub use check::check_links;
pub use stream::link_stream;
