//! Site configuration (`docs.toml`) parsing and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "docs.toml";

/// Errors that can occur when working with the site configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("site title cannot be empty")]
    EmptyTitle,

    #[error("invalid base-url '{0}': must start and end with '/'")]
    InvalidBaseUrl(String),

    #[error("invalid repository '{0}': must be an http(s) URL")]
    InvalidRepository(String),
}

/// The complete docs.toml configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,

    #[serde(default)]
    pub source: SourceSection,

    #[serde(default)]
    pub build: BuildSection,
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Site title, shown in the hero and in every page title.
    pub title: String,

    /// One-line description shown under the title on the homepage.
    pub tagline: String,

    /// URL path the site is served from.
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: String::from("dToolkit"),
            tagline: String::from("A collection of utility modules for Roblox developers"),
            base_url: String::from("/"),
        }
    }
}

/// Where the documented library's source lives, for "view source" links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceSection {
    /// Repository URL; source links are plain text without it.
    pub repository: Option<String>,

    pub branch: String,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            repository: None,
            branch: String::from("main"),
        }
    }
}

impl SourceSection {
    /// Browse URL for a file and line, if a repository is configured.
    pub fn source_url(&self, path: &str, line: u32) -> Option<String> {
        let repository = self.repository.as_deref()?.trim_end_matches('/');
        Some(format!(
            "{}/blob/{}/{}#L{}",
            repository,
            self.branch,
            path.trim_start_matches('/'),
            line
        ))
    }
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSection {
    /// Directory of JSON payloads.
    pub payloads: PathBuf,

    /// Directory the site is written to.
    pub output: PathBuf,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            payloads: PathBuf::from("docs/api"),
            output: PathBuf::from("build"),
        }
    }
}

impl SiteConfig {
    /// Load a configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load a configuration file, falling back to the defaults if it does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_path(path)
        } else {
            info!("no {} found, using default configuration", path.display());
            Ok(Self::default())
        }
    }

    /// Parse a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or fails validation.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }

        let base_url = &self.site.base_url;
        if !base_url.starts_with('/') || !base_url.ends_with('/') {
            return Err(ConfigError::InvalidBaseUrl(base_url.clone()));
        }

        if let Some(repository) = &self.source.repository {
            if !repository.starts_with("https://") && !repository.starts_with("http://") {
                return Err(ConfigError::InvalidRepository(repository.clone()));
            }
        }

        Ok(())
    }
}
