// src/report.rs
// =============================================================================
// This module turns checked links into findings a CI system can show.
//
// Only two outcomes produce a finding:
// - Invalid:     "Broken link" + an optional "did you mean" suggestion
// - NonRelative: "should be relative" + the relative link to use instead
//
// Each finding can be printed as a GitHub-style workflow annotation:
//
//   ::error file=docs/a.md,line=3,col=5,endLine=3,endColumn=15::Broken link: `b.md`
//
// or serialized to JSON with the rest of the findings.
//
// Rust concepts:
// - Structs with Serialize: findings print as JSON for free
// - String::replace: the message templates are plain text with placeholders
// =============================================================================

use serde::Serialize;

use crate::checker::{relative_replacement, suggest, LinkOccurrence, Validity};

pub const DEFAULT_BROKEN_TEMPLATE: &str = "Broken link: `{link}`{suggestion}";
pub const DEFAULT_RELATIVE_TEMPLATE: &str = "Link `{link}` should be relative{suggestion}";

/// Message templates; `{link}` and `{suggestion}` are replaced when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub broken: String,
    pub relative: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            broken: DEFAULT_BROKEN_TEMPLATE.to_string(),
            relative: DEFAULT_RELATIVE_TEMPLATE.to_string(),
        }
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub file: String,
    pub line: usize,
    pub col: usize,
    pub end_line: usize,
    pub end_col: usize,
    pub link: String,
    pub validity: Validity,
    /// Suggested replacement for the link, if we have one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub message: String,
}

impl Finding {
    // Formats the finding as a single-line workflow command
    //
    // Newlines inside the message would end the command early, so they are
    // escaped the way GitHub Actions expects (%0A, %0D, %25).
    pub fn annotation(&self) -> String {
        format!(
            "::error file={},line={},col={},endLine={},endColumn={}::{}",
            escape_property(&self.file),
            self.line,
            self.col,
            self.end_line,
            self.end_col,
            escape_data(&self.message)
        )
    }
}

// Builds findings from (link, validity) pairs
pub struct Reporter<'a> {
    templates: &'a Templates,
    base_path: Option<&'a str>,
    max_suggestion_distance: usize,
}

impl<'a> Reporter<'a> {
    pub fn new(templates: &'a Templates, base_path: Option<&'a str>, max_suggestion_distance: usize) -> Self {
        Self {
            templates,
            base_path,
            max_suggestion_distance,
        }
    }

    // Returns the finding for a link, or None if the link is fine
    //
    // Parameters:
    //   link: the checked link
    //   validity: what the classifier said about it
    //   candidates: tracked paths to pick suggestions from (only used for
    //     Invalid links)
    pub fn finding(&self, link: &LinkOccurrence, validity: Validity, candidates: &[String]) -> Option<Finding> {
        let (template, suggestion, hint) = match validity {
            Validity::Valid | Validity::Unknown => return None,
            Validity::Invalid => {
                let suggestion = suggest(link, candidates)
                    .filter(|s| s.is_within(self.max_suggestion_distance))
                    .map(|s| s.candidate.to_string());
                let hint = suggestion
                    .as_ref()
                    .map(|s| format!(". Did you mean `{}`?", s))
                    .unwrap_or_default();
                (&self.templates.broken, suggestion, hint)
            }
            Validity::NonRelative => {
                let suggestion = relative_replacement(link, self.base_path);
                let hint = suggestion
                    .as_ref()
                    .map(|s| format!(". Use `{}` instead.", s))
                    .unwrap_or_default();
                (&self.templates.relative, suggestion, hint)
            }
        };

        Some(Finding {
            file: link.source_file.display().to_string(),
            line: link.start.line,
            col: link.start.col,
            end_line: link.end.line,
            end_col: link.end.col,
            link: link.link.clone(),
            validity,
            suggestion,
            message: render(template, &link.link, &hint),
        })
    }
}

fn render(template: &str, link: &str, suggestion: &str) -> String {
    template
        .replace("{link}", link)
        .replace("{suggestion}", suggestion)
}

fn escape_data(text: &str) -> String {
    text.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(text: &str) -> String {
    escape_data(text).replace(':', "%3A").replace(',', "%2C")
}
