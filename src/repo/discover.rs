// src/repo/discover.rs
// =============================================================================
// Expands glob patterns like "**/*.md" into the list of files to check.
//
// We walk the directory tree with `walkdir` and test every file against a
// `globset::GlobSet` built from all patterns at once. Paths are matched (and
// returned) relative to the root, so "docs/*.md" means the same thing no
// matter where the tool is started from.
//
// `*` does not cross directory boundaries ("*.md" is top-level only), while
// `**` matches any number of directories, like in most shells.
// =============================================================================

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::error::ConfigError;

// Lists files under `root` matching any of `patterns`
//
// Parameters:
//   root: directory to search
//   patterns: glob patterns, relative to root
//
// Returns: a lazy iterator of root-relative paths in sorted order, or a
// ConfigError if a pattern is not a valid glob. The `.git` directory is
// never entered.
pub fn discover(root: &Path, patterns: &[String]) -> Result<impl Iterator<Item = PathBuf>, ConfigError> {
    let globs = build_globset(patterns)?;
    let root = root.to_path_buf();

    let files = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git")
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(move |entry| {
            let relative = entry.path().strip_prefix(&root).ok()?;
            globs.is_match(relative).then(|| relative.to_path_buf())
        });

    Ok(files)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, ConfigError> {
    let invalid = |pattern: &str, source| ConfigError::InvalidGlob {
        pattern: pattern.to_string(),
        source,
    };

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        // Walked paths have no "./" prefix, so "./docs/*.md" must lose it too
        let glob = GlobBuilder::new(pattern.trim_start_matches("./"))
            .literal_separator(true)
            .build()
            .map_err(|e| invalid(pattern, e))?;
        builder.add(glob);
    }

    builder.build().map_err(|e| invalid(&patterns.join(","), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        for path in [
            "README.md",
            "CHANGELOG.md",
            "docs/guide.md",
            "docs/deep/nested.md",
            "docs/image.png",
            "src/main.rs",
            ".git/description.md",
        ] {
            let path = dir.path().join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        dir
    }

    fn found(dir: &TempDir, patterns: &[&str]) -> Vec<PathBuf> {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        discover(dir.path(), &patterns).unwrap().collect()
    }

    #[test]
    fn test_double_star_matches_every_depth() {
        let dir = fixture();
        assert_eq!(
            found(&dir, &["**/*.md"]),
            vec![
                PathBuf::from("CHANGELOG.md"),
                PathBuf::from("README.md"),
                PathBuf::from("docs/deep/nested.md"),
                PathBuf::from("docs/guide.md"),
            ]
        );
    }

    #[test]
    fn test_single_star_stays_in_directory() {
        let dir = fixture();
        assert_eq!(
            found(&dir, &["docs/*.md"]),
            vec![PathBuf::from("docs/guide.md")]
        );
    }

    #[test]
    fn test_several_patterns_are_merged() {
        let dir = fixture();
        assert_eq!(
            found(&dir, &["README.md", "src/*.rs"]),
            vec![PathBuf::from("README.md"), PathBuf::from("src/main.rs")]
        );
    }

    #[test]
    fn test_leading_dot_slash_is_ignored() {
        let dir = fixture();
        assert_eq!(
            found(&dir, &["./docs/**/*.md"]),
            vec![
                PathBuf::from("docs/deep/nested.md"),
                PathBuf::from("docs/guide.md"),
            ]
        );
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let dir = fixture();
        let result = discover(dir.path(), &["docs/[".to_string()]);
        assert!(matches!(result, Err(ConfigError::InvalidGlob { .. })));
    }
}
