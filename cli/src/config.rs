//! Configuration file handling for the CLI.
//!
//! Settings live in `$XDG_CONFIG_HOME/fileshelf/config.toml` (or the platform
//! equivalent). Every key is optional; command-line flags win over the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use fileshelf_business::{BusinessConfig, FilterMode, MAX_PER_PAGE};
use serde::{Deserialize, Serialize};

/// CLI configuration stored on disk
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the file service
    pub api_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
    pub filter_mode: Option<FilterMode>,
    pub per_page: Option<u32>,
}

/// Values given on the command line for this run.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub filter_mode: Option<FilterMode>,
    pub per_page: Option<u32>,
}

impl Config {
    /// Returns `$XDG_CONFIG_HOME/fileshelf/config.toml` on Linux,
    /// appropriate paths on other platforms.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("dev", "fileshelf", "fileshelf")
            .context("Failed to determine config directory")?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Returns the default configuration if `path` does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Layers the file and then `overrides` over the built-in defaults.
    pub fn business_config(&self, overrides: &Overrides) -> BusinessConfig {
        let mut config = BusinessConfig::default();
        let service = &self.service;

        if let Some(url) = overrides.api_url.as_ref().or(service.api_url.as_ref()) {
            config.api_base_url.clone_from(url);
        }
        if let Some(timeout) = service.timeout_secs {
            config.timeout_secs = timeout;
        }
        if let Some(mode) = overrides.filter_mode.or(service.filter_mode) {
            config.filter_mode = mode;
        }
        if let Some(per_page) = overrides.per_page.or(service.per_page) {
            config.items_per_page = per_page.clamp(1, MAX_PER_PAGE);
        }
        config
    }
}
