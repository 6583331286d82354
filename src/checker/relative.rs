// src/checker/relative.rs
// =============================================================================
// This module turns a NonRelative link into the relative link the author
// should have written.
//
// Two kinds of links end up here:
// - absolute paths inside the repo:      /docs/guide.md
// - links to our own published site:     https://docs.example.com/epd/planning#goals
//
// Steps:
// 1. Split the link into path and fragment (scheme, host and query are dropped)
// 2. If the site is published from a sub-directory (the "base path"), put
//    that directory in front of the path unless it is already there
// 3. Work out the path from the linking document's directory to the target
// 4. Put the "#fragment" back
//
// Example (base path "docs"):
//   link:     https://docs.example.com/epd/planning#goals
//   document: docs/epd/other.md
//   result:   planning#goals
//
// Everything here is string manipulation; the file system is never touched.
//
// Rust concepts:
// - OnceLock: compile the regex once, on first use
// - Path components: walk a path piece by piece
// =============================================================================

use regex::Regex;
use std::iter;
use std::path::{Component, Path};
use std::sync::OnceLock;

use super::link::LinkOccurrence;
use super::validity::source_dir;

// The URL-shaped pattern from RFC 3986, appendix B
//
//   group 2 = scheme, 4 = host, 5 = path, 7 = query, 9 = fragment
const URL_SHAPE: &str = r"^(([^:/?#]+):)?(//([^/?#]*))?([^?#]*)(\?([^#]*))?(#(.*))?";

fn url_shape() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // The pattern is a constant, so failing to compile it is a programmer error
    PATTERN.get_or_init(|| Regex::new(URL_SHAPE).expect("URL_SHAPE is a valid regex"))
}

// Computes the relative replacement for a NonRelative link
//
// Parameters:
//   occurrence: the offending link and the document it is in (the document
//     path is expected to be relative to the repository root)
//   base_path: repo directory the site is published from, e.g. "docs"
//
// Returns: Some("../guide.md#install") style replacement, or None when the
// link points at the document's own directory and there is nothing to write
pub fn relative_replacement(occurrence: &LinkOccurrence, base_path: Option<&str>) -> Option<String> {
    let (path, fragment) = split_path_and_fragment(&occurrence.link);
    let absolute = reroot(&path, base_path);

    let from = directory_segments(source_dir(&occurrence.source_file));
    let relative = relative_path(&from, &absolute);
    if relative.is_empty() {
        return None;
    }

    Some(match fragment {
        Some(fragment) => format!("{}#{}", relative, fragment),
        None => relative,
    })
}

// Returns the link's path (always starting with "/") and its fragment
fn split_path_and_fragment(link: &str) -> (String, Option<String>) {
    let Some(caps) = url_shape().captures(link) else {
        return (ensure_leading_slash(link), None);
    };

    let path = caps.get(5).map_or("", |m| m.as_str());
    let fragment = caps.get(9).map(|m| m.as_str().to_string());
    (ensure_leading_slash(path), fragment)
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

// Prefixes "/<base_path>" unless the path is already inside that directory
fn reroot(absolute: &str, base_path: Option<&str>) -> String {
    let base = base_path.unwrap_or_default().trim_matches('/');
    if base.is_empty() {
        return absolute.to_string();
    }

    let prefix = format!("/{}", base);
    let already_inside = absolute
        .strip_prefix(&prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));

    if already_inside {
        absolute.to_string()
    } else {
        format!("{}{}", prefix, absolute)
    }
}

// Directory of the linking document as clean segments, rooted at the repo root
fn directory_segments(dir: &Path) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    for component in dir.components() {
        match component {
            Component::Normal(name) => segments.push(name.to_string_lossy().into_owned()),
            Component::ParentDir => {
                segments.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    segments
}

// Splits a "/"-separated path and collapses "." and ".." segments
fn url_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            name => segments.push(name),
        }
    }
    segments
}

// Relative path between two rooted locations
//
// Example:
//   from ["docs", "epd"], to "/docs/guide.md" -> "../guide.md"
fn relative_path(from: &[String], to: &str) -> String {
    let to = url_segments(to);
    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a.as_str() == **b)
        .count();

    iter::repeat("..")
        .take(from.len() - common)
        .chain(to[common..].iter().copied())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::link::Position;
    use std::path::PathBuf;

    fn rewrite(source: &str, link: &str, base_path: Option<&str>) -> Option<String> {
        let occurrence = LinkOccurrence {
            source_file: PathBuf::from(source),
            link: link.to_string(),
            start: Position { line: 1, col: 1 },
            end: Position { line: 1, col: 1 },
        };
        relative_replacement(&occurrence, base_path)
    }

    #[test]
    fn test_published_url_becomes_relative() {
        assert_eq!(
            rewrite("docs/epd/other.md", "https://host/epd/planning#heading", Some("docs")),
            Some("planning#heading".to_string())
        );
    }

    #[test]
    fn test_absolute_repo_path_becomes_relative() {
        assert_eq!(
            rewrite("docs/epd/other.md", "/docs/guide.md", Some("docs")),
            Some("../guide.md".to_string())
        );
        assert_eq!(
            rewrite("docs/a.md", "/README.md", None),
            Some("../README.md".to_string())
        );
        assert_eq!(
            rewrite("README.md", "/docs/a.md#setup", None),
            Some("docs/a.md#setup".to_string())
        );
    }

    #[test]
    fn test_base_path_slashes_are_ignored() {
        assert_eq!(
            rewrite("docs/epd/other.md", "https://host/epd/planning", Some("/docs/")),
            Some("planning".to_string())
        );
    }

    #[test]
    fn test_path_already_under_base_is_not_prefixed_twice() {
        assert_eq!(
            rewrite("docs/epd/other.md", "https://host/docs/epd/x.md", Some("docs")),
            Some("x.md".to_string())
        );
    }

    #[test]
    fn test_base_path_match_is_per_segment() {
        // "/docsite" is not inside "/docs"
        assert_eq!(
            rewrite("docs/x.md", "/docsite/a.md", Some("docs")),
            Some("docsite/a.md".to_string())
        );
    }

    #[test]
    fn test_dot_segments_and_trailing_slash() {
        assert_eq!(
            rewrite("docs/epd/other.md", "/docs/./epd/../guide.md", None),
            Some("../guide.md".to_string())
        );
        assert_eq!(
            rewrite("docs/epd/other.md", "https://host/epd/planning/", Some("docs")),
            Some("planning".to_string())
        );
    }

    #[test]
    fn test_query_is_dropped() {
        assert_eq!(
            rewrite("docs/epd/other.md", "https://host/epd/planning?tab=1", Some("docs")),
            Some("planning".to_string())
        );
    }

    #[test]
    fn test_own_directory_has_no_replacement() {
        assert_eq!(rewrite("docs/epd/other.md", "https://host/epd/", Some("docs")), None);
        assert_eq!(rewrite("docs/epd/other.md", "https://host/epd#top", Some("docs")), None);
        assert_eq!(rewrite("README.md", "https://host", None), None);
    }
}
