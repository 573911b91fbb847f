use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct HavenConfig {
    pub storage: StorageConfig,
    pub feed: FeedConfig,
    pub suggestions: SuggestionConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
    /// Seed version file. Defaults to `seed_state.json` beside the database.
    pub seed_state_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FeedConfig {
    pub page_size: usize,
    /// Rows from the end of the loaded feed at which the next page is requested.
    pub load_more_threshold: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SuggestionConfig {
    pub limit: usize,
    /// Root label whose children are mutually exclusive.
    pub single_choice_group: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_haven_dir()
            .join("haven.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path, seed_state_path: None }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { page_size: 50, load_more_threshold: 5 }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self { limit: 6, single_choice_group: "Meal Source".into() }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".into() }
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns `~/.haven/`
pub fn default_haven_dir() -> PathBuf {
    home_dir().join(".haven")
}

/// Returns the default config file path: `~/.haven/config.toml`
pub fn default_config_path() -> PathBuf {
    default_haven_dir().join("config.toml")
}

impl HavenConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!(path = %path.display(), "no config file, using defaults");
            HavenConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// HAVEN_DB, HAVEN_SEED_STATE, HAVEN_LOG_LEVEL.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HAVEN_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("HAVEN_SEED_STATE") {
            self.storage.seed_state_path = Some(val);
        }
        if let Ok(val) = std::env::var("HAVEN_LOG_LEVEL") {
            self.log.level = val;
        }
    }

    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    pub fn resolved_seed_state_path(&self) -> PathBuf {
        match &self.storage.seed_state_path {
            Some(path) => expand_tilde(path),
            None => self.resolved_db_path().with_file_name("seed_state.json"),
        }
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else {
        PathBuf::from(path)
    }
}
