// src/repo/git.rs
// =============================================================================
// This module lists the files git knows about, which are the candidates we
// pick "did you mean" suggestions from.
//
// Strategy:
// - Run `git ls-files -z` in the repository root
// - Split the output on NUL bytes (with -z, git does not quote odd file names)
// - Keep git's order; the suggestion ranker breaks ties by list position
//
// If git is missing or the directory is not a repository, we log a warning
// and return an empty list: broken links are still reported, just without
// suggestions.
//
// Rust concepts:
// - tokio::process::Command: run a program without blocking the runtime
// - String::from_utf8_lossy: accept output that is not valid UTF-8
// =============================================================================

use std::path::Path;
use tokio::process::Command;
use tracing::{debug, warn};

// Lists every tracked file in the repository
//
// Parameters:
//   root: repository root (where to run git)
//
// Returns: repo-relative paths such as "docs/guide.md", in git's order
pub async fn tracked_files(root: &Path) -> Vec<String> {
    let output = Command::new("git")
        .args(["ls-files", "-z"])
        .current_dir(root)
        .output()
        .await;

    match output {
        Ok(output) if output.status.success() => {
            let files = parse_ls_files(&output.stdout);
            debug!("git ls-files returned {} file(s)", files.len());
            files
        }
        Ok(output) => {
            warn!(
                "git ls-files failed, no suggestions will be made: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            Vec::new()
        }
        Err(e) => {
            warn!("Could not run git, no suggestions will be made: {}", e);
            Vec::new()
        }
    }
}

fn parse_ls_files(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .split('\0')
        .filter(|path| !path.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_ls_files_output() {
        let stdout = b"README.md\0docs/my file.md\0src/main.rs\0";
        assert_eq!(
            parse_ls_files(stdout),
            vec!["README.md", "docs/my file.md", "src/main.rs"]
        );
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_ls_files(b"").is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_gives_no_candidates() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("not-here");
        assert!(tracked_files(&missing).await.is_empty());
    }
}
