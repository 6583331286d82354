// src/checker/markdown.rs
// =============================================================================
// This module extracts links from Markdown text.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Can report the byte range each event came from (`into_offset_iter`)
//
// The byte ranges are what let us point CI annotations at the exact line and
// column of a broken link. Anything the parser does not consider a link
// (plain text that looks like a path, half-written `[text](` syntax, code
// spans) is simply never reported.
//
// Rust concepts:
// - Iterators: links are produced lazily, one parser event at a time
// - Lifetimes: the iterator borrows the document text ('_)
// - Ranges: byte offsets into the source text
// =============================================================================

use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag};
use std::ops::Range;
use std::path::{Path, PathBuf};

use super::link::{LinkOccurrence, Position};

// A markdown document held in memory together with a table of where each
// line starts, so byte offsets can be turned into line/column positions.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    text: String,
    /// Byte offset of the first character of every line (always starts with 0)
    line_starts: Vec<usize>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = line_starts(&text);
        Self {
            path: path.into(),
            text,
            line_starts,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Returns every link in the document, top to bottom, left to right
    //
    // Each call starts a fresh parse, so the sequence can be walked as many
    // times as needed.
    //
    // Example input:
    //   "See [docs](./guide.md)"
    //
    // Example output:
    //   one LinkOccurrence with link "./guide.md" at line 1, col 12..22
    pub fn links(&self) -> impl Iterator<Item = LinkOccurrence> + '_ {
        let mut open: Option<OpenLink<'_>> = None;

        Parser::new_ext(&self.text, markdown_options())
            .into_offset_iter()
            .filter_map(move |(event, range)| match event {
                // In pulldown-cmark 0.9, Link is Tag::Link(link_type, dest_url, title)
                Event::Start(Tag::Link(link_type, dest_url, _title)) => {
                    open = Some(OpenLink {
                        link_type,
                        dest_url,
                        text_end: range.start + 1,
                        syntax: range,
                    });
                    None
                }
                Event::End(Tag::Link(..)) => open.take().map(|link| self.occurrence(link)),
                // Everything between Start and End is the link text
                _ => {
                    if let Some(link) = open.as_mut() {
                        link.text_end = link.text_end.max(range.end);
                    }
                    None
                }
            })
    }

    fn occurrence(&self, link: OpenLink<'_>) -> LinkOccurrence {
        let OpenLink {
            link_type,
            dest_url,
            syntax: range,
            text_end,
        } = link;

        // Narrow the span down to the target itself when it is written inside
        // the link syntax; otherwise report the whole link.
        let span = self
            .text
            .get(range.clone())
            .and_then(|syntax| locate_target(syntax, link_type, &dest_url, text_end - range.start))
            .map(|inner| (range.start + inner.start)..(range.start + inner.end))
            .unwrap_or(range);

        // <me@example.com> comes back from the parser without its scheme
        let link = match link_type {
            LinkType::Email if !dest_url.starts_with("mailto:") => format!("mailto:{}", dest_url),
            _ => dest_url.to_string(),
        };

        LinkOccurrence {
            source_file: self.path.clone(),
            link,
            start: self.position(span.start),
            end: self.position(span.end),
        }
    }

    // Converts a byte offset into a 1-based line/column position
    fn position(&self, offset: usize) -> Position {
        // line_starts[0] == 0, so this is always at least 1
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        let col = self
            .text
            .get(line_start..offset)
            .map_or(0, |prefix| prefix.chars().count())
            + 1;

        Position { line, col }
    }
}

// A link whose Start event has been seen but not its End yet
struct OpenLink<'a> {
    link_type: LinkType,
    dest_url: CowStr<'a>,
    /// Byte range of the whole link syntax
    syntax: Range<usize>,
    /// Byte offset just past the link text (before the closing `]`)
    text_end: usize,
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
        .collect()
}

// Finds the byte range of the link target inside the link's own syntax
//
// Parameters:
//   syntax: the source text of the whole link, e.g. "[docs](./guide.md)"
//   link_type: what kind of link the parser saw
//   dest_url: the target the parser extracted
//   text_end: offset in `syntax` just past the link text
//
// Returns: the range relative to `syntax`, or None when the target is not
// written inside the link (reference-style links keep it in a definition)
fn locate_target(syntax: &str, link_type: LinkType, dest_url: &str, text_end: usize) -> Option<Range<usize>> {
    match link_type {
        LinkType::Inline => locate_inline_target(syntax, text_end),
        LinkType::Autolink | LinkType::Email => {
            let start = syntax.find(dest_url)?;
            Some(start..start + dest_url.len())
        }
        _ => None,
    }
}

// Inline links look like [text](target "title") or [text](<target>)
//
// The parser hands us the target with escapes and entities already resolved
// ("foo\_bar.md" becomes "foo_bar.md"), so we cannot search for it. Instead
// we read the raw target from the source, starting at the "](" that follows
// the link text.
fn locate_inline_target(syntax: &str, text_end: usize) -> Option<Range<usize>> {
    let open = text_end + syntax.get(text_end..)?.find("](")? + 2;
    let rest = &syntax[open..];
    let start = open + (rest.len() - rest.trim_start().len());
    let target = &syntax[start..];

    match target.strip_prefix('<') {
        Some(inner) => Some(start + 1..start + 1 + angle_target_len(inner)),
        None => Some(start..start + bare_target_len(target)),
    }
}

// Length of a <target>, up to the first unescaped '>'
fn angle_target_len(inner: &str) -> usize {
    let mut escaped = false;
    for (idx, c) in inner.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '>' | '\n' => return idx,
            _ => {}
        }
    }
    inner.len()
}

// Length of a bare target: it ends at whitespace (a title may follow) or at
// the ')' that closes the link. Parentheses inside the target must balance.
fn bare_target_len(target: &str) -> usize {
    let mut depth = 0usize;
    let mut escaped = false;
    for (idx, c) in target.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' if depth == 0 => return idx,
            ')' => depth -= 1,
            c if c.is_whitespace() => return idx,
            _ => {}
        }
    }
    target.len()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does into_offset_iter() give us?
//    - The same events as iterating the parser directly
//    - Plus a Range<usize> with the byte offsets the event came from
//    - For a link, that range covers the whole "[text](target)" syntax
//
// 2. Why partition_point?
//    - line_starts is sorted, so we can binary search it
//    - partition_point returns how many line starts are <= offset,
//      which is exactly the 1-based line number
//
// 3. Why count chars() for the column?
//    - Strings are UTF-8, so one character can be several bytes
//    - Editors and CI annotations count characters
//
// 4. What is impl Iterator<Item = ...> + '_ ?
//    - "some iterator type" without spelling out the pulldown-cmark types
//    - '_ says the iterator borrows from &self (the document text)
// -----------------------------------------------------------------------------
