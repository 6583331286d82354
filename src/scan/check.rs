// src/scan/check.rs
// =============================================================================
// One full run: find the documents, check their links, collect the findings.
//
// How it works:
// 1. Expand the file patterns into a list of documents (repo::discover)
// 2. Stream every link in those documents through the classifier
// 3. The first Invalid link triggers loading the suggestion candidates
// 4. Every Invalid or NonRelative link becomes a Finding
//
// Printing is left to the caller; this module only decides what to report.
// =============================================================================

use futures::StreamExt;
use std::future::Future;
use std::path::{Path, PathBuf};

use super::link_stream;
use crate::checker::Validity;
use crate::config::Settings;
use crate::error::ConfigError;
use crate::repo;
use crate::report::{Finding, Reporter};

/// Everything a run found.
#[derive(Debug, Default)]
pub struct Outcome {
    pub findings: Vec<Finding>,
    /// Number of links classified, whatever the result
    pub checked: usize,
    /// Number of Invalid or NonRelative links
    pub failures: usize,
}

impl Outcome {
    // Exit code 0 = all good, 1 = broken or non-relative links found
    pub fn exit_code(&self) -> i32 {
        if self.failures == 0 {
            0
        } else {
            1
        }
    }

    // Formats the findings for stdout: one annotation per line, or a JSON array
    pub fn render(&self, json: bool) -> serde_json::Result<String> {
        if json {
            return serde_json::to_string_pretty(&self.findings);
        }

        Ok(self
            .findings
            .iter()
            .map(Finding::annotation)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

// Checks every link in the documents under `root` that match the settings
//
// Parameters:
//   root: the repository root ("." once the process has moved into it)
//   settings: patterns, base URL, templates and suggestion threshold
//   load_candidates: produces the tracked paths used for suggestions; it is
//     called at most once, and only when a link turns out to be Invalid
//
// Returns: the collected Outcome, or a ConfigError for a bad file pattern
pub async fn check_links<F, Fut>(
    root: &Path,
    settings: &Settings,
    load_candidates: F,
) -> Result<Outcome, ConfigError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Vec<String>>,
{
    let files = repo::discover(root, &settings.files)?.map(|path| document_path(root, path));
    let links = link_stream(files, settings.base_url_hostname.as_deref());
    futures::pin_mut!(links);

    let reporter = Reporter::new(
        &settings.templates,
        settings.base_path.as_deref(),
        settings.max_suggestion_distance,
    );

    let mut load_candidates = Some(load_candidates);
    let mut candidates: Vec<String> = Vec::new();
    let mut outcome = Outcome::default();

    while let Some((link, validity)) = links.next().await {
        outcome.checked += 1;
        if validity.is_failure() {
            outcome.failures += 1;
        }

        if validity == Validity::Invalid {
            if let Some(load) = load_candidates.take() {
                candidates = load().await;
            }
        }

        if let Some(finding) = reporter.finding(&link, validity, &candidates) {
            outcome.findings.push(finding);
        }
    }

    Ok(outcome)
}

// Documents stay repo-relative when we already run inside the repository
fn document_path(root: &Path, relative: PathBuf) -> PathBuf {
    if root == Path::new(".") {
        relative
    } else {
        root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Templates;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    fn settings(max_suggestion_distance: usize) -> Settings {
        Settings {
            files: vec!["**/*.md".to_string()],
            root: PathBuf::from("."),
            base_url_hostname: None,
            base_path: None,
            max_suggestion_distance,
            templates: Templates::default(),
            json: false,
        }
    }

    fn repo_with(markdown: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("guide.md"), markdown).unwrap();
        fs::write(dir.path().join("notes.txt"), "[ignored](nowhere.md)").unwrap();
        dir
    }

    fn candidates() -> Vec<String> {
        // "./missing.md" -> "mising.md" is three deletions
        vec!["README.md".to_string(), "mising.md".to_string()]
    }

    #[tokio::test]
    async fn test_broken_link_with_suggestion_within_threshold() {
        let dir = repo_with("See [gone](./missing.md) and [top](#top).\n");

        let outcome = check_links(dir.path(), &settings(5), || async { candidates() })
            .await
            .unwrap();

        assert_eq!(outcome.checked, 2);
        assert_eq!(outcome.failures, 1);
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(outcome.findings.len(), 1);

        let finding = &outcome.findings[0];
        assert_eq!(finding.link, "./missing.md");
        assert_eq!(finding.validity, Validity::Invalid);
        assert_eq!(finding.suggestion.as_deref(), Some("mising.md"));
        assert!(finding.file.ends_with("guide.md"));
    }

    #[tokio::test]
    async fn test_lower_threshold_keeps_finding_without_suggestion() {
        let dir = repo_with("See [gone](./missing.md) and [top](#top).\n");

        let outcome = check_links(dir.path(), &settings(2), || async { candidates() })
            .await
            .unwrap();

        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.findings[0].validity, Validity::Invalid);
        assert_eq!(outcome.findings[0].suggestion, None);
        assert_eq!(outcome.findings[0].message, "Broken link: `./missing.md`");
    }

    #[tokio::test]
    async fn test_fragment_link_passes_without_loading_candidates() {
        let dir = repo_with("Back to [top](#top).\n");
        let loaded_cell = Cell::new(false);
        let loaded = &loaded_cell;

        let outcome = check_links(dir.path(), &settings(5), move || async move {
            loaded.set(true);
            candidates()
        })
        .await
        .unwrap();

        assert_eq!(outcome.checked, 1);
        assert!(outcome.findings.is_empty());
        assert_eq!(outcome.exit_code(), 0);
        assert!(!loaded.get());
    }

    #[tokio::test]
    async fn test_candidates_load_once_for_many_broken_links() {
        let dir = repo_with("[a](a.md) [b](b.md) [c](c.md)\n");
        let loads_cell = Cell::new(0);
        let loads = &loads_cell;

        let outcome = check_links(dir.path(), &settings(5), move || async move {
            loads.set(loads.get() + 1);
            Vec::new()
        })
        .await
        .unwrap();

        assert_eq!(outcome.failures, 3);
        assert_eq!(loads.get(), 1);
    }

    #[tokio::test]
    async fn test_bad_pattern_is_config_error() {
        let dir = repo_with("");
        let mut settings = settings(5);
        settings.files = vec!["docs/[".to_string()];

        let result = check_links(dir.path(), &settings, || async { Vec::new() }).await;
        assert!(matches!(result, Err(ConfigError::InvalidGlob { .. })));
    }

    #[test]
    fn test_render_annotations_or_json() {
        let outcome = Outcome {
            findings: vec![Finding {
                file: "guide.md".to_string(),
                line: 1,
                col: 12,
                end_line: 1,
                end_col: 24,
                link: "./missing.md".to_string(),
                validity: Validity::Invalid,
                suggestion: None,
                message: "Broken link: `./missing.md`".to_string(),
            }],
            checked: 2,
            failures: 1,
        };

        assert_eq!(
            outcome.render(false).unwrap(),
            "::error file=guide.md,line=1,col=12,endLine=1,endColumn=24::Broken link: `./missing.md`"
        );

        let json: serde_json::Value = serde_json::from_str(&outcome.render(true).unwrap()).unwrap();
        assert_eq!(json[0]["link"], "./missing.md");
        assert_eq!(json[0]["validity"], "invalid");
    }

    #[test]
    fn test_nothing_to_render() {
        assert_eq!(Outcome::default().render(false).unwrap(), "");
        assert_eq!(Outcome::default().render(true).unwrap(), "[]");
    }
}
