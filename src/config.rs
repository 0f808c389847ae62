use crate::error::BrowserError;
use crate::recipe::DEFAULT_SERVINGS;
use crate::search::PAGE_SIZE;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main browser configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    /// Base URL of the recipe catalog API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Number of search results per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Directory holding the shopping list and favorites snapshots
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,
    /// Servings assumed when a recipe does not state its yield
    #[serde(default = "default_servings")]
    pub default_servings: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout: default_timeout(),
            page_size: default_page_size(),
            storage_dir: default_storage_dir(),
            default_servings: default_servings(),
        }
    }
}

// Default value functions
fn default_api_base_url() -> String {
    "https://forkify-api.herokuapp.com/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> usize {
    PAGE_SIZE
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".recipe-browser")
}

fn default_servings() -> u32 {
    DEFAULT_SERVINGS
}

impl BrowserConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BROWSER__ prefix
    /// 2. recipe-browser.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BROWSER__PAGE_SIZE
    pub fn load() -> Result<Self, BrowserError> {
        Ok(load_config()?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<BrowserConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-browser").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_BROWSER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
