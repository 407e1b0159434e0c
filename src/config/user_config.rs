//! User-level configuration for authorscan
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/authorscan/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::provenance::DEFAULT_COMMIT_WINDOW;
use crate::remote::walker::DEFAULT_MAX_DEPTH;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub github: GitHubSettings,

    #[serde(default)]
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct GitHubSettings {
    /// Personal access token; raises the API rate limit
    pub token: Option<String>,

    /// API base URL (default: https://api.github.com)
    pub api_url: Option<String>,

    /// Global timeout per HTTP request, in seconds (default: 30)
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct AnalysisSettings {
    /// Directory levels to walk (default: 4)
    pub max_depth: Option<usize>,

    /// Recent commits inspected for provenance (default: 30)
    pub commit_window: Option<usize>,

    /// Run the scaffolding-tool provenance check (default: true)
    pub provenance: Option<bool>,
}

impl GitHubSettings {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

impl AnalysisSettings {
    pub fn max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    pub fn commit_window(&self) -> usize {
        self.commit_window.unwrap_or(DEFAULT_COMMIT_WINDOW)
    }

    pub fn provenance(&self) -> bool {
        self.provenance.unwrap_or(true)
    }
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/authorscan/config.toml)
    ///
    /// An unreadable or malformed file is reported and skipped.
    pub fn load() -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            match Self::load_from(&path) {
                Ok(file_config) => config.merge(file_config),
                Err(e) => warn!("Ignoring user config: {:#}", e),
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse one config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("authorscan").join("config.toml"))
    }

    /// Environment variables override everything
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup("GITHUB_TOKEN")
            .or_else(|| lookup("GH_TOKEN"))
            .filter(|t| !t.is_empty())
        {
            self.github.token = Some(token);
        }
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.github.token.is_some() {
            self.github.token = other.github.token;
        }
        if other.github.api_url.is_some() {
            self.github.api_url = other.github.api_url;
        }
        if other.github.timeout_secs.is_some() {
            self.github.timeout_secs = other.github.timeout_secs;
        }
        if other.analysis.max_depth.is_some() {
            self.analysis.max_depth = other.analysis.max_depth;
        }
        if other.analysis.commit_window.is_some() {
            self.analysis.commit_window = other.analysis.commit_window;
        }
        if other.analysis.provenance.is_some() {
            self.analysis.provenance = other.analysis.provenance;
        }
    }

    /// Effective settings as TOML, with the token masked
    pub fn to_display_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        shown.github.token = self.github.token().map(mask_token);
        shown.github.api_url = Some(self.github.api_url().to_string());
        shown.github.timeout_secs = Some(self.github.timeout().as_secs());
        shown.analysis.max_depth = Some(self.analysis.max_depth());
        shown.analysis.commit_window = Some(self.analysis.commit_window());
        shown.analysis.provenance = Some(self.analysis.provenance());
        toml::to_string_pretty(&shown).context("Failed to render config")
    }

    /// Create the user config directory and an example config file
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::write_example(&config_path)?;
        Ok(config_path)
    }

    /// Write the example config unless a file already exists
    fn write_example(config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            let example = r#"# authorscan user configuration

[github]
# Personal access token (or set GITHUB_TOKEN)
# token = "ghp_..."
# api_url = "https://api.github.com"
# timeout_secs = 30

[analysis]
# max_depth = 4
# commit_window = 30
# provenance = true
"#;
            std::fs::write(config_path, example)?;
        }
        Ok(())
    }
}

fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    format!("{}****", visible)
}
