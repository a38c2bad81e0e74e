//! Configuration loading and management for smartpdf.
//!
//! Loads settings from `smartpdf.toml` with environment variable overrides.
//! A missing config file is not an error; every setting has a default.

use crate::summary::DEFAULT_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "smartpdf.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Summary settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Density as a percentage of the document's sentences (0-100)
    pub length: u32,
}

/// Quiz settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Generate a quiz alongside each summary
    pub enabled: bool,
    /// Fixed seed for reproducible quizzes
    pub seed: Option<u64>,
}

/// Storage paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base path for data storage
    pub path: PathBuf,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub summary: SummaryConfig,
    pub quiz: QuizConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from the default location (smartpdf.toml in cwd or home)
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::read_file(&path)?,
            None => Config::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(path)?;
        config.apply_env()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.summary.length = config.summary.length.min(100);
        Ok(config)
    }

    /// Override settings from environment variables
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(path) = std::env::var("SMARTPDF_STORAGE_PATH") {
            self.storage.path = PathBuf::from(path);
        }
        if let Ok(seed) = std::env::var("SMARTPDF_SEED") {
            let seed = seed
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SMARTPDF_SEED".to_string(), seed))?;
            self.quiz.seed = Some(seed);
        }
        Ok(())
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        let home_config = dirs::home_dir()?
            .join(".config")
            .join("smartpdf")
            .join(CONFIG_FILE);
        home_config.exists().then_some(home_config)
    }

    /// Path of the tantivy index inside the storage directory
    pub fn search_path(&self) -> PathBuf {
        self.storage.path.join("search_index")
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seed: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data"),
        }
    }
}
