// src/config.rs
// =============================================================================
// Turns the raw command-line values into the settings a run needs.
//
// The only real work here is the base URL: we keep just its hostname, since
// that is what links are compared against. A base URL that cannot be parsed
// stops the run with a ConfigError.
// =============================================================================

use std::path::PathBuf;
use url::Url;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::report::Templates;

#[derive(Debug, Clone)]
pub struct Settings {
    pub files: Vec<String>,
    pub root: PathBuf,
    /// None when no base URL was configured
    pub base_url_hostname: Option<String>,
    pub base_path: Option<String>,
    pub max_suggestion_distance: usize,
    pub templates: Templates,
    pub json: bool,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url_hostname: hostname_of(&cli.base_url)?,
            base_path: cli.base_path.filter(|p| !p.trim_matches('/').is_empty()),
            files: cli.files,
            root: cli.root,
            max_suggestion_distance: cli.max_suggestion_distance,
            templates: Templates {
                broken: cli.broken_template,
                relative: cli.relative_template,
            },
            json: cli.json,
        })
    }
}

// Extracts the hostname from the configured base URL
//
// Examples:
//   ""                               -> None
//   "https://docs.example.com/guide" -> Some("docs.example.com")
//   "docs.example.com"               -> Some("docs.example.com") (https:// assumed)
//   "file:///srv/docs"               -> Err(MissingHost)
fn hostname_of(base_url: &str) -> Result<Option<String>, ConfigError> {
    let base_url = base_url.trim();
    if base_url.is_empty() {
        return Ok(None);
    }

    let candidate = if base_url.contains("://") {
        base_url.to_string()
    } else {
        format!("https://{}", base_url)
    };

    let parsed = Url::parse(&candidate).map_err(|source| ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(Some(host.to_string())),
        _ => Err(ConfigError::MissingHost {
            url: base_url.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_empty_base_url_disables_hostname_check() {
        assert_eq!(hostname_of("").unwrap(), None);
        assert_eq!(hostname_of("   ").unwrap(), None);
    }

    #[test]
    fn test_hostname_is_extracted() {
        assert_eq!(
            hostname_of("https://docs.example.com/guide/").unwrap(),
            Some("docs.example.com".to_string())
        );
        assert_eq!(
            hostname_of("docs.example.com").unwrap(),
            Some("docs.example.com".to_string())
        );
    }

    #[test]
    fn test_bad_base_urls_are_config_errors() {
        assert!(matches!(
            hostname_of("https://exa mple.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            hostname_of("file:///srv/docs"),
            Err(ConfigError::MissingHost { .. })
        ));
    }

    #[test]
    fn test_settings_from_cli() {
        let cli = Cli::try_parse_from([
            "link-warden",
            "--base-url",
            "https://docs.example.com",
            "--base-path",
            "/",
        ])
        .unwrap();

        let settings = Settings::from_cli(cli).unwrap();
        assert_eq!(settings.base_url_hostname.as_deref(), Some("docs.example.com"));
        // "/" names the repo root, which is the same as no base path
        assert_eq!(settings.base_path, None);
    }
}
