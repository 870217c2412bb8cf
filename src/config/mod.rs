//! User configuration for qxs.
//!
//! The configuration lives in a TOML file, by default `~/.qxs/config.toml`
//! (`%LOCALAPPDATA%\qxs\config.toml` on Windows). Every key is optional:
//!
//! ```toml
//! # Ascending priority: later namespaces win
//! namespaces = [
//!     "o",
//!     "de",
//!     ".de",
//!     { name = "mine", github = "johndoe" },
//!     { name = "local", file = "~/shortcuts.yml" },
//!     { name = "team", url = "https://example.com/shortcuts.yml" },
//!     { name = "inline", shortcuts = { "ex 1" = "https://example.com/?q={%query}" } },
//! ]
//! language = "de"
//! country = "de"
//! default_keyword = "g"
//! browser = "firefox"
//! ```
//!
//! A missing file yields [`QxsConfig::default`]. Relative `file` paths are
//! resolved against the directory of the configuration file after `~` and
//! `$VAR` expansion.

use crate::constants::{
    DEFAULT_COUNTRY, DEFAULT_DATA_SOURCE_URL, DEFAULT_GITHUB_BASE_URL, DEFAULT_LANGUAGE,
    DEFAULT_NAMESPACES,
};
use crate::core::{QxsError, Result};
use crate::environment::Environment;
use crate::models::NamespaceSource;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

fn default_namespaces() -> Vec<NamespaceSource> {
    DEFAULT_NAMESPACES.into_iter().map(NamespaceSource::official).collect()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_browser() -> String {
    if cfg!(target_os = "windows") {
        "explorer".to_string()
    } else if cfg!(target_os = "macos") {
        "open".to_string()
    } else {
        "xdg-open".to_string()
    }
}

fn default_data_source_url() -> String {
    DEFAULT_DATA_SOURCE_URL.to_string()
}

fn default_github_base_url() -> String {
    DEFAULT_GITHUB_BASE_URL.to_string()
}

/// Contents of the qxs configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QxsConfig {
    /// Namespaces in ascending priority
    #[serde(default = "default_namespaces")]
    pub namespaces: Vec<NamespaceSource>,

    /// Default language code
    #[serde(default = "default_language")]
    pub language: String,

    /// Default country code
    #[serde(default = "default_country")]
    pub country: String,

    /// Keyword used for queries that match no shortcut
    #[serde(default)]
    pub default_keyword: Option<String>,

    /// Program that opens URLs
    #[serde(default = "default_browser")]
    pub browser: String,

    /// Bulk JSON document with the official namespaces
    #[serde(default = "default_data_source_url")]
    pub data_source_url: String,

    /// Base URL of GitHub-hosted user namespaces
    #[serde(default = "default_github_base_url")]
    pub github_base_url: String,
}

impl Default for QxsConfig {
    fn default() -> Self {
        Self {
            namespaces: default_namespaces(),
            language: default_language(),
            country: default_country(),
            default_keyword: None,
            browser: default_browser(),
            data_source_url: default_data_source_url(),
            github_base_url: default_github_base_url(),
        }
    }
}

impl QxsConfig {
    /// Load from `path` if given, otherwise from [`default_path`](Self::default_path).
    ///
    /// A file that does not exist yields the defaults.
    ///
    /// # Errors
    ///
    /// [`QxsError::ConfigError`] if the file cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };

        if fs::try_exists(&path).await.unwrap_or(false) {
            Self::load_from(&path).await
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from `path`.
    ///
    /// # Errors
    ///
    /// [`QxsError::ConfigError`] if the file cannot be read or parsed, or a
    /// `file` namespace path cannot be expanded.
    pub async fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path).await.map_err(|e| QxsError::ConfigError {
            message: format!("Failed to read config from {}: {e}", path.display()),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| QxsError::ConfigError {
            message: format!("Failed to parse config from {}: {e}", path.display()),
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_file_paths(base_dir)?;
        Ok(config)
    }

    /// Default location of the configuration file.
    ///
    /// # Errors
    ///
    /// [`QxsError::ConfigError`] if the home (or local data) directory is unknown.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| QxsError::ConfigError {
                    message: "Unable to determine local data directory".to_string(),
                })?
                .join("qxs")
        } else {
            dirs::home_dir()
                .ok_or_else(|| QxsError::ConfigError {
                    message: "Unable to determine home directory".to_string(),
                })?
                .join(".qxs")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Expand and absolutize the paths of `file` namespaces.
    fn resolve_file_paths(&mut self, base_dir: &Path) -> Result<()> {
        for source in &mut self.namespaces {
            if let NamespaceSource::File { path, .. } = source {
                let raw = path.to_string_lossy().into_owned();
                let expanded = shellexpand::full(&raw).map_err(|e| QxsError::ConfigError {
                    message: format!("Failed to expand namespace path '{raw}': {e}"),
                })?;

                let expanded = PathBuf::from(expanded.as_ref());
                *path = if expanded.is_absolute() {
                    expanded
                } else {
                    base_dir.join(expanded)
                };
            }
        }
        Ok(())
    }
}

/// [`Environment`] backed by a [`QxsConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConfigEnvironment {
    config: QxsConfig,
}

impl ConfigEnvironment {
    /// Environment reading from `config`.
    #[must_use]
    pub const fn new(config: QxsConfig) -> Self {
        Self { config }
    }

    /// The underlying configuration.
    #[must_use]
    pub const fn config(&self) -> &QxsConfig {
        &self.config
    }
}

impl Environment for ConfigEnvironment {
    fn country(&self) -> &str {
        &self.config.country
    }

    fn language(&self) -> &str {
        &self.config.language
    }

    fn namespaces(&self) -> &[NamespaceSource] {
        &self.config.namespaces
    }

    fn default_keyword(&self) -> Option<&str> {
        self.config.default_keyword.as_deref()
    }
}
