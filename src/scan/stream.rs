// src/scan/stream.rs
// =============================================================================
// This module turns a list of files into one long stream of checked links.
//
// How it works:
// 1. Take the next file path from the input
// 2. Read the file (this is where we wait on the disk)
// 3. Extract its links and classify each one
// 4. Hand the (link, validity) pairs out one by one
// 5. Only then move on to the next file
//
// Nothing is read ahead: if the consumer stops pulling from the stream, the
// remaining files are never opened.
//
// Rust concepts:
// - stream::iter: turns any iterator into a Stream
// - then: runs an async step for every item, one at a time, in order
// - flat_map: turns "a Vec per file" into "one item per link"
// =============================================================================

use futures::stream::{self, Stream, StreamExt};
use std::path::PathBuf;
use tracing::{debug, trace, warn};

use crate::checker::{classify, Document, LinkOccurrence, Validity};

// Checks every link in every file
//
// Parameters:
//   paths: the markdown files to check, in the order they should be reported
//   base_url_hostname: hostname the docs are published under (see classify)
//
// Returns: a Stream of (link, validity) pairs, files in input order and links
// in source order within each file
//
// Example:
//   let links = link_stream(vec!["README.md".into()], None);
//   futures::pin_mut!(links);
//   while let Some((link, validity)) = links.next().await { ... }
pub fn link_stream<'a, I>(
    paths: I,
    base_url_hostname: Option<&'a str>,
) -> impl Stream<Item = (LinkOccurrence, Validity)> + 'a
where
    I: IntoIterator<Item = PathBuf> + 'a,
    I::IntoIter: 'a,
{
    stream::iter(paths)
        .then(move |path| check_file(path, base_url_hostname))
        .flat_map(stream::iter)
}

// Reads one file and classifies all of its links
//
// A read failure is not fatal for the run: the file simply contributes no
// links. Broken link targets are not read failures; they come back as
// Validity::Invalid like any other result.
async fn check_file(path: PathBuf, base_url_hostname: Option<&str>) -> Vec<(LinkOccurrence, Validity)> {
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Skipping {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let document = Document::new(path, text);
    let links: Vec<LinkOccurrence> = document.links().collect();
    debug!("{} link(s) found in {}", links.len(), document.path().display());

    let mut results = Vec::with_capacity(links.len());
    for link in links {
        let validity = classify(&link, base_url_hostname).await;
        trace!("{}:{} {} is {}", link.source_file.display(), link.start.line, link.link, validity);
        results.push((link, validity));
    }

    results
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a Stream?
//    - Like an Iterator, but getting the next item may need to .await
//    - futures::StreamExt adds helpers like next(), then(), collect()
//
// 2. Why `then` and not `buffer_unordered`?
//    - buffer_unordered runs many futures at once and returns them in
//      whatever order they finish
//    - We promise results in input order, one file at a time, so we use
//      then(), which waits for each future before starting the next
//
// 3. Why collect the links of a file into a Vec first?
//    - The markdown parser borrows the document text
//    - Collecting first means nothing borrowed is held across an .await
//
// 4. What is pin_mut! in the example?
//    - Calling .next() on a stream needs it to be pinned in memory
//    - futures::pin_mut! pins a local variable on the stack
// -----------------------------------------------------------------------------
