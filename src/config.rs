use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// How direct selector interaction relates to the listing URL
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Selection updates and queries immediately; the URL is left behind until
    /// the next navigation.
    #[default]
    LeadingSelection,
    /// Every interaction rewrites the URL and the URL listener is the only path
    /// that updates selection and dispatches queries.
    UrlAuthoritative,
}

/// Main browser configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    /// Base URL of the recipe provider
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Path of the listing screen
    #[serde(default = "default_listing_path")]
    pub listing_path: String,
    /// Path of the detail screen
    #[serde(default = "default_detail_path")]
    pub detail_path: String,
    /// Selector/URL synchronisation model
    #[serde(default)]
    pub sync_mode: SyncMode,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            listing_path: default_listing_path(),
            detail_path: default_detail_path(),
            sync_mode: SyncMode::default(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("recipe-browser/{}", env!("CARGO_PKG_VERSION"))
}

fn default_listing_path() -> String {
    "/recipes".to_string()
}

fn default_detail_path() -> String {
    "/recipe".to_string()
}

impl BrowserConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPES__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPES__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<BrowserConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix("RECIPES")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
