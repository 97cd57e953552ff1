use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const ENV_PREFIX: &str = "POPCORN_APPWRITE_";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub appwrite: AppwriteConfig,

    pub catalog: CatalogConfig,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid Appwrite endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// "pretty" or "json"
    pub log_format: String,

    #[serde(default)]
    pub suppress_connection_errors: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            suppress_connection_errors: false,
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppwriteConfig {
    pub endpoint: String,

    pub project_id: String,

    /// Server API key. Client-side sessions leave this unset.
    pub api_key: Option<String>,

    pub database_id: String,

    pub search_count_collection_id: String,

    pub saved_movies_collection_id: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Default for AppwriteConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: String::new(),
            api_key: None,
            database_id: String::new(),
            search_count_collection_id: String::new(),
            saved_movies_collection_id: String::new(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Prefix joined with a movie's poster path to form the counter's poster URL.
    pub image_base_url: String,

    pub trending_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            trending_limit: 5,
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies environment overrides.
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = paths
            .iter()
            .find(|path| path.exists())
            .map_or_else(
                || {
                    info!("No config file found, using defaults");
                    Ok(Self::default())
                },
                |path| {
                    info!("Loading config from: {}", path.display());
                    Self::load_from_path(path)
                },
            )?;

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Applies `POPCORN_APPWRITE_*` values. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(&format!("{ENV_PREFIX}{name}")).filter(|value| !value.trim().is_empty())
        };

        let appwrite = &mut self.appwrite;
        if let Some(value) = get("ENDPOINT") {
            appwrite.endpoint = value;
        }
        if let Some(value) = get("PROJECT_ID") {
            appwrite.project_id = value;
        }
        if let Some(value) = get("API_KEY") {
            appwrite.api_key = Some(value);
        }
        if let Some(value) = get("DATABASE_ID") {
            appwrite.database_id = value;
        }
        if let Some(value) = get("SEARCH_COUNT_COLLECTION_ID") {
            appwrite.search_count_collection_id = value;
        }
        if let Some(value) = get("SAVED_MOVIES_COLLECTION_ID") {
            appwrite.saved_movies_collection_id = value;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("popcorn").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".popcorn").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    /// Fails fast on missing store identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let appwrite = &self.appwrite;

        let required = [
            ("appwrite.endpoint", &appwrite.endpoint),
            ("appwrite.project_id", &appwrite.project_id),
            ("appwrite.database_id", &appwrite.database_id),
            (
                "appwrite.search_count_collection_id",
                &appwrite.search_count_collection_id,
            ),
            (
                "appwrite.saved_movies_collection_id",
                &appwrite.saved_movies_collection_id,
            ),
        ];

        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Missing(*name));
        }

        let endpoint = url::Url::parse(&appwrite.endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {e}", appwrite.endpoint)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint(appwrite.endpoint.clone()));
        }

        if self.catalog.trending_limit == 0 {
            return Err(ConfigError::Invalid(
                "catalog.trending_limit must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
