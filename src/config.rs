use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

pub const COMPLETION_KEY_ENV: &str = "GROQ_API_KEY";
pub const METADATA_KEY_ENV: &str = "OMDB_API_KEY";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

/// Chat-completion provider settings (OpenAI-compatible wire format).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompletionConfig {
    #[serde(default = "default_completion_url", alias = "apiurl")]
    pub api_url: String,
    #[serde(default, alias = "apikey")]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens", alias = "maxtokens")]
    pub max_tokens: u32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: default_completion_url(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataConfig {
    #[serde(default = "default_metadata_url", alias = "apiurl")]
    pub api_url: String,
    #[serde(default, alias = "apikey")]
    pub api_key: Option<String>,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            api_url: default_metadata_url(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_lookups", alias = "maxlookups")]
    pub max_lookups: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_lookups: default_max_lookups(),
        }
    }
}

/// Settings shared by both outbound HTTP clients.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default, alias = "timeout")]
    pub timeout_secs: Option<u64>,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_port() -> String {
    "5000".to_string()
}

fn default_completion_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_temperature() -> f64 {
    0.5
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_metadata_url() -> String {
    "http://www.omdbapi.com/".to_string()
}

fn default_max_lookups() -> usize {
    10
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(path, &content)
    }

    fn from_yaml(path: &str, content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    /// Reads `path` if it exists, falls back to the built-in defaults otherwise,
    /// then applies the API key environment overrides.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let mut config = if Path::new(path).exists() {
            info!("Using config file: {}", path);
            Self::from_file(path)?
        } else {
            info!("Config file {} not found, using defaults", path);
            Config::default()
        };

        config.apply_env(|name| std::env::var(name).ok());
        config.warn_missing_keys();
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(COMPLETION_KEY_ENV).filter(|k| !k.is_empty()) {
            self.completion.api_key = Some(key);
        }
        if let Some(key) = lookup(METADATA_KEY_ENV).filter(|k| !k.is_empty()) {
            self.metadata.api_key = Some(key);
        }
    }

    // Missing keys surface later as upstream authentication failures.
    fn warn_missing_keys(&self) {
        if self.completion.api_key.is_none() {
            warn!("No completion API key configured (set {})", COMPLETION_KEY_ENV);
        }
        if self.metadata.api_key.is_none() {
            warn!("No metadata API key configured (set {})", METADATA_KEY_ENV);
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}
