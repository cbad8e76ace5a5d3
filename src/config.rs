//! Configuration file support
//!
//! Loads settings from ~/.ctxhl.toml (or %USERPROFILE%\.ctxhl.toml on Windows)
//!
//! Example:
//! ```text
//! # ctxhl configuration
//! tab-width = 4
//! color = true
//! strict-attributes = false
//! language = "C"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::Result;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Tab width for display
    pub tab_width: usize,
    /// Whether to emit colors
    pub color: bool,
    /// Reject grammars that name undefined attributes
    pub strict_attributes: bool,
    /// Language used when none is given on the command line
    pub language: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: 8,
            color: true,
            strict_attributes: false,
            language: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".ctxhl.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".ctxhl.toml"))
        }
    }

    /// Load configuration from the default path
    ///
    /// A missing file gives the defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!("Loading configuration from {}", path.display());
                Self::parse(&contents)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.tab_width = config.tab_width.clamp(1, 16);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
tab-width = 4
color = false
strict-attributes = true
language = "Python"
        "#;

        let config = Config::parse(contents).unwrap();
        assert_eq!(config.tab_width, 4);
        assert!(!config.color);
        assert!(config.strict_attributes);
        assert_eq!(config.language.as_deref(), Some("Python"));
    }

    #[test]
    fn test_empty_config_gives_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_tab_width_clamped() {
        assert_eq!(Config::parse("tab-width = 0").unwrap().tab_width, 1);
        assert_eq!(Config::parse("tab-width = 100").unwrap().tab_width, 16);
    }

    #[test]
    fn test_malformed_config() {
        assert!(matches!(Config::parse("tab-width = \"wide\""), Err(Error::Config(_))));
        assert!(matches!(Config::parse("line-numbers = true"), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("ctxhl-config-that-does-not-exist.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
