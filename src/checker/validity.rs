// src/checker/validity.rs
// =============================================================================
// This module decides whether a link found in a document works.
//
// The checks run in a fixed order and the first one that applies wins:
// 1. Link mentions our own published hostname -> NonRelative
// 2. Link has a scheme (https:, mailto:) or a host (//cdn...) -> Unknown
// 3. Strip "?query" and "#fragment", percent-decode what is left
// 4. Path starts with "/" -> NonRelative (links inside the repo must be relative)
// 5. Path exists next to the document -> Valid, otherwise Invalid
//
// Network links are never fetched. A fragment-only link such as "#top"
// decodes to an empty path, which points at the document's own directory
// and therefore always counts as Valid (headings are not checked).
//
// Rust concepts:
// - async fn: the existence check goes through tokio's file system API
// - Cow<str>: percent-decoding only allocates when something was decoded
// - Option::filter: treat an empty hostname the same as no hostname
// =============================================================================

use std::borrow::Cow;
use std::path::Path;
use tracing::debug;
use url::{ParseError, Url};

use super::link::{LinkOccurrence, Validity};

// Classifies one link
//
// Parameters:
//   occurrence: the link and the document it was found in
//   base_url_hostname: hostname the docs are published under ("" or None
//     turns the hostname check off)
//
// Returns: exactly one Validity; this never fails. If the file system
// refuses to tell us whether the target exists, the answer is Invalid.
pub async fn classify(occurrence: &LinkOccurrence, base_url_hostname: Option<&str>) -> Validity {
    let link = occurrence.link.as_str();

    if let Some(hostname) = base_url_hostname.filter(|h| !h.is_empty()) {
        if link.contains(hostname) {
            return Validity::NonRelative;
        }
    }

    if has_network_origin(link) {
        return Validity::Unknown;
    }

    let path = decoded_path(link);
    if path.starts_with('/') {
        return Validity::NonRelative;
    }

    let target = source_dir(&occurrence.source_file).join(path.as_ref());
    match tokio::fs::try_exists(&target).await {
        Ok(true) => Validity::Valid,
        Ok(false) => Validity::Invalid,
        Err(e) => {
            debug!("Could not check {}: {}", target.display(), e);
            Validity::Invalid
        }
    }
}

// True when the link carries a scheme or an authority (host)
//
// Url::parse only succeeds for links with a scheme. Every scheme-less link
// fails with RelativeUrlWithoutBase; any other parse error means a scheme was
// present but the rest was malformed, which still makes it a network link.
fn has_network_origin(link: &str) -> bool {
    if link.starts_with("//") {
        return true;
    }

    match Url::parse(link) {
        Ok(_) => true,
        Err(ParseError::RelativeUrlWithoutBase) => false,
        Err(_) => true,
    }
}

// Returns the path part of a scheme-less link, percent-decoded
//
// Examples:
//   "guide.md#install"   -> "guide.md"
//   "my%20notes.md?x=1"  -> "my notes.md"
//   "#top"               -> ""
pub(crate) fn decoded_path(link: &str) -> Cow<'_, str> {
    let path = link.split('#').next().unwrap_or_default();
    let path = path.split('?').next().unwrap_or_default();

    match urlencoding::decode(path) {
        Ok(decoded) => decoded,
        // Percent-escapes that are not valid UTF-8
        Err(_) => Cow::Owned(
            String::from_utf8_lossy(&urlencoding::decode_binary(path.as_bytes())).into_owned(),
        ),
    }
}

// Directory links are resolved against; "README.md" has an empty parent,
// which would not exist as a path, so it becomes "."
pub(crate) fn source_dir(source_file: &Path) -> &Path {
    source_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}
