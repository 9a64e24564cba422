use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pagination::DEFAULT_PER_PAGE;
use crate::store::FilterMode;

/// Request timeout applied to every call to the file service.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    /// Base URL of the file service, without the `/api` suffix.
    pub api_base_url: String,
    pub timeout_secs: u64,
    /// Which tier filters, sorts and paginates the listing.
    pub filter_mode: FilterMode,
    pub items_per_page: u32,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }

    fn base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn api_url(&self) -> String {
        format!("{}/api", self.base())
    }

    /// `GET`/`POST` target for listing and uploading.
    pub fn files_url(&self) -> String {
        format!("{}/files", self.api_url())
    }

    /// `DELETE` target for one file; the name is percent-encoded.
    pub fn file_url(&self, name: &str) -> String {
        format!("{}/{}", self.files_url(), urlencoding::encode(name))
    }

    pub fn download_url(&self, name: &str) -> String {
        format!("{}/download/{}", self.base(), urlencoding::encode(name))
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            filter_mode: FilterMode::default(),
            items_per_page: DEFAULT_PER_PAGE,
        }
    }
}
