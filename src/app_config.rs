use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::session::SummarySize;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Summarization backend settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Translation service settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Local history settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Defaults applied to new summary requests
    #[serde(default)]
    pub defaults: RequestDefaults,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Summarization backend configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    // @field: Backend origin, also used to resolve download links
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    // @field: Timeout seconds for one summarization call
    #[serde(default = "default_backend_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_secs: default_backend_timeout_secs(),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Endpoint of the translation service
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,

    /// Value sent as the `client` query parameter
    #[serde(default = "default_translation_client")]
    pub client: String,

    /// Request timeout in seconds
    #[serde(default = "default_translation_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_translation_endpoint(),
            client: default_translation_client(),
            timeout_secs: default_translation_timeout_secs(),
        }
    }
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Local history configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct HistoryConfig {
    /// SQLite file backing the history; the platform data directory is used when unset
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

/// Defaults used when the CLI builds a request
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RequestDefaults {
    #[serde(default)]
    pub size: SummarySize,

    /// Source-language hint
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_true")]
    pub translate_to_english: bool,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            size: SummarySize::default(),
            language: default_language(),
            translate_to_english: default_true(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_backend_timeout_secs() -> u64 {
    600 // download + transcription of a long video
}

fn default_translation_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_translation_client() -> String {
    "gtx".to_string()
}

fn default_translation_timeout_secs() -> u64 {
    15
}

fn default_language() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load a configuration file, writing the defaults first when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.backend_url()?;
        Url::parse(&self.translation.endpoint)
            .with_context(|| format!("Invalid translation endpoint: {}", self.translation.endpoint))?;

        if self.backend.timeout_secs == 0 {
            return Err(anyhow!("Backend timeout must be greater than zero"));
        }
        if self.translation.timeout_secs == 0 {
            return Err(anyhow!("Translation timeout must be greater than zero"));
        }
        if self.translation.client.trim().is_empty() {
            return Err(anyhow!("Translation client identifier must not be empty"));
        }

        crate::language_utils::validate_language_code(&self.defaults.language)?;

        Ok(())
    }

    /// Parsed backend origin
    pub fn backend_url(&self) -> Result<Url> {
        Url::parse(&self.backend.base_url)
            .with_context(|| format!("Invalid backend URL: {}", self.backend.base_url))
    }
}
