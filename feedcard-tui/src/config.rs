use anyhow::{Context, Result};
use feedcard_types::{Post, Viewer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_BASE_URL;

/// Link shared when no page URL has been configured
pub const DEFAULT_PAGE_URL: &str = "http://localhost:5173/";

pub const SERVER_URL_ENV: &str = "FEEDCARD_SERVER_URL";
pub const PAGE_URL_ENV: &str = "FEEDCARD_PAGE_URL";

/// Credentials handed over by the host application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user: Viewer,
}

/// Server configuration stored locally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server_url: String,
    #[serde(default = "default_page_url")]
    pub page_url: String,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

fn default_page_url() -> String {
    DEFAULT_PAGE_URL.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_BASE_URL.to_string(),
            page_url: default_page_url(),
            last_updated: chrono::Utc::now(),
        }
    }
}

/// Configuration manager for the .feedcard directory
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a config manager over ~/.feedcard
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Could not determine home directory")?;
        Self::with_dir(home_dir.join(".feedcard"))
    }

    /// Create a config manager over an explicit directory
    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create .feedcard directory")?;
        }

        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    fn session_file(&self) -> PathBuf {
        self.config_dir.join("session.json")
    }

    fn server_config_file(&self) -> PathBuf {
        self.config_dir.join("server_config.json")
    }

    /// Save session data
    pub fn save_session(&self, session: &SessionData) -> Result<()> {
        let json =
            serde_json::to_string_pretty(session).context("Failed to serialize session data")?;
        fs::write(self.session_file(), json).context("Failed to write session file")?;
        Ok(())
    }

    /// Load session data, if the host has written any
    pub fn load_session(&self) -> Result<Option<SessionData>> {
        read_json(&self.session_file(), "session")
    }

    /// Delete session data
    pub fn delete_session(&self) -> Result<()> {
        let session_file = self.session_file();
        if session_file.exists() {
            fs::remove_file(&session_file).context("Failed to delete session file")?;
        }
        Ok(())
    }

    /// Save server configuration
    pub fn save_server_config(&self, config: &ServerConfig) -> Result<()> {
        let json =
            serde_json::to_string_pretty(config).context("Failed to serialize server config")?;
        fs::write(self.server_config_file(), json)
            .context("Failed to write server config file")?;
        Ok(())
    }

    /// Load server configuration
    pub fn load_server_config(&self) -> Result<Option<ServerConfig>> {
        read_json(&self.server_config_file(), "server config")
    }

    /// Determine the server URL to use based on priority:
    /// 1. CLI argument
    /// 2. Environment variable FEEDCARD_SERVER_URL
    /// 3. Saved configuration file
    /// 4. Default
    pub fn determine_server_url(&self, cli_override: Option<String>) -> Result<String> {
        if let Some(url) = cli_override {
            return Ok(url);
        }
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            return Ok(url);
        }
        if let Some(config) = self.load_server_config()? {
            return Ok(config.server_url);
        }
        Ok(DEFAULT_BASE_URL.to_string())
    }

    /// Determine the link the share action copies, with the same priority as
    /// the server URL
    pub fn determine_page_url(&self, cli_override: Option<String>) -> Result<String> {
        if let Some(url) = cli_override {
            return Ok(url);
        }
        if let Ok(url) = std::env::var(PAGE_URL_ENV) {
            return Ok(url);
        }
        if let Some(config) = self.load_server_config()? {
            return Ok(config.page_url);
        }
        Ok(DEFAULT_PAGE_URL.to_string())
    }
}

/// Load a post snapshot exported by the feed
pub fn load_post_snapshot(path: &Path) -> Result<Post> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read post snapshot {}", path.display()))?;
    serde_json::from_str(&json).context("Failed to parse post snapshot")
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {} file", what))?;
    let value = serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", what))?;
    Ok(Some(value))
}
