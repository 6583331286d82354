// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every option can also be set through an environment variable. That is how
// CI systems usually pass inputs to an action, so the same binary works from
// a terminal and from a workflow file.
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct definition
// - Doc comments (///) on fields become the --help text
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use crate::checker::SUGGEST_MIN_DISTANCE;
use crate::report::{DEFAULT_BROKEN_TEMPLATE, DEFAULT_RELATIVE_TEMPLATE};

#[derive(Parser, Debug)]
#[command(
    name = "link-warden",
    version,
    about = "Find broken relative links in markdown docs and suggest fixes",
    long_about = "link-warden checks every link in your markdown files against the repository. \
                  Broken links get a \"did you mean\" suggestion from the tracked files, and \
                  links to your own published site are rewritten as relative paths. \
                  Web links are never fetched."
)]
pub struct Cli {
    /// Glob patterns of files to check (comma-separated when given via env)
    ///
    /// Patterns are matched against paths relative to --root.
    #[arg(env = "LINK_WARDEN_FILES", value_delimiter = ',', default_value = "**/*.md")]
    pub files: Vec<String>,

    /// Repository root; file patterns and links are resolved from here
    #[arg(long, env = "LINK_WARDEN_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// URL the docs are published under (e.g. https://docs.example.com)
    ///
    /// Links containing its hostname must be written as relative paths.
    /// Leave empty to turn that check off.
    #[arg(long, env = "LINK_WARDEN_BASE_URL", default_value = "")]
    pub base_url: String,

    /// Repo directory the published site is built from (e.g. docs)
    #[arg(long, env = "LINK_WARDEN_BASE_PATH")]
    pub base_path: Option<String>,

    /// Largest edit distance at which a "did you mean" suggestion is shown
    #[arg(long, env = "LINK_WARDEN_MAX_SUGGESTION_DISTANCE", default_value_t = SUGGEST_MIN_DISTANCE)]
    pub max_suggestion_distance: usize,

    /// Message for broken links; {link} and {suggestion} are substituted
    #[arg(long, env = "LINK_WARDEN_BROKEN_TEMPLATE", default_value = DEFAULT_BROKEN_TEMPLATE)]
    pub broken_template: String,

    /// Message for links that should be relative; {link} and {suggestion} are substituted
    #[arg(long, env = "LINK_WARDEN_RELATIVE_TEMPLATE", default_value = DEFAULT_RELATIVE_TEMPLATE)]
    pub relative_template: String,

    /// Output results in JSON format instead of CI annotations
    #[arg(long)]
    pub json: bool,

    /// Log every file and link as it is checked
    #[arg(short, long)]
    pub verbose: bool,
}
