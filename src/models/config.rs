//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP behavior for contest sources
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Contest source endpoints
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Bookmark persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Countdown refresh timer
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Solution link curation
    #[serde(default)]
    pub admin: AdminConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        if self.refresh.interval_secs == 0 {
            return Err(AppError::validation("refresh.interval_secs must be > 0"));
        }
        for (name, endpoint) in [
            ("sources.codeforces_url", &self.sources.codeforces_url),
            ("sources.codechef_url", &self.sources.codechef_url),
            ("sources.leetcode_url", &self.sources.leetcode_url),
        ] {
            url::Url::parse(endpoint)
                .map_err(|e| AppError::validation(format!("{name} is not a valid URL: {e}")))?;
        }
        if self.storage.bookmarks_file.trim().is_empty() {
            return Err(AppError::validation("storage.bookmarks_file is empty"));
        }
        if self.admin.video_hosts.iter().all(|h| h.trim().is_empty()) {
            return Err(AppError::validation("No admin.video_hosts defined"));
        }
        Ok(())
    }

    /// Resolve the bookmark file against a storage directory.
    pub fn bookmarks_path(&self, storage_dir: &Path) -> PathBuf {
        storage_dir.join(&self.storage.bookmarks_file)
    }
}

/// HTTP client settings shared by all sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Upper bound for a single source fetch, in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Endpoints of the three contest platforms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "defaults::codeforces_url")]
    pub codeforces_url: String,

    #[serde(default = "defaults::codechef_url")]
    pub codechef_url: String,

    #[serde(default = "defaults::leetcode_url")]
    pub leetcode_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            codeforces_url: defaults::codeforces_url(),
            codechef_url: defaults::codechef_url(),
            leetcode_url: defaults::leetcode_url(),
        }
    }
}

/// Bookmark persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File holding the JSON list of bookmarked IDs, relative to the storage dir
    #[serde(default = "defaults::bookmarks_file")]
    pub bookmarks_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bookmarks_file: defaults::bookmarks_file(),
        }
    }
}

/// Countdown refresh settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "defaults::refresh_interval")]
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: defaults::refresh_interval(),
        }
    }
}

/// Admin curation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Hosts accepted for solution video links
    #[serde(default = "defaults::video_hosts")]
    pub video_hosts: Vec<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            video_hosts: defaults::video_hosts(),
        }
    }
}

mod defaults {
    // Fetcher defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; ContestHive/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }

    // Source defaults
    pub fn codeforces_url() -> String {
        "https://codeforces.com/api/contest.list".into()
    }
    pub fn codechef_url() -> String {
        "https://www.codechef.com/api/list/contests/all".into()
    }
    pub fn leetcode_url() -> String {
        "https://leetcode.com/graphql".into()
    }

    // Storage defaults
    pub fn bookmarks_file() -> String {
        "contest-hive-bookmarks.json".into()
    }

    // Refresh defaults
    pub fn refresh_interval() -> u64 {
        60
    }

    // Admin defaults
    pub fn video_hosts() -> Vec<String> {
        vec!["youtube.com".into(), "youtu.be".into()]
    }
}
