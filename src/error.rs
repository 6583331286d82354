// src/error.rs
// =============================================================================
// Errors that stop a run before any link is checked.
//
// Problems with individual links or files are never errors (they become a
// Validity or a skipped file). Only bad configuration ends up here, and
// main() turns it into exit code 2.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// --base-url could not be parsed at all
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// --base-url parsed but has nothing to compare links against
    #[error("base URL '{url}' has no hostname")]
    MissingHost { url: String },

    /// One of the file patterns is not a valid glob
    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
