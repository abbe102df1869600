use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::github::Credentials;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .pr-locator.toml.
/// All fields are optional; the tool works with env vars alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// Basic-auth username. If None, falls back to the GIT_USER env var.
    pub user: Option<String>,
    /// Access token. If None, falls back to the GIT_TOKEN env var.
    pub token: Option<String>,
    /// Default repository slug (owner/repo) to collect from.
    pub repository: Option<String>,
}

impl Config {
    /// Load configuration from .pr-locator.toml in the current directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(".pr-locator.toml");
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the basic-auth pair: config file values take precedence,
    /// falling back to the GIT_USER / GIT_TOKEN env vars. Returns None when
    /// either half is missing from both sources.
    pub fn credentials(&self) -> Option<Credentials> {
        let user = self
            .github
            .user
            .clone()
            .or_else(|| std::env::var("GIT_USER").ok())?;
        let token = self
            .github
            .token
            .clone()
            .or_else(|| std::env::var("GIT_TOKEN").ok())?;
        Some(Credentials { user, token })
    }
}
