//! Application configuration management
//!
//! This module handles loading and validating configuration from TOML files.
//! Following JPL Rule 24: All configuration is validated at startup.

use crate::audio::DeliveryMode;
use crate::core::provider::BackendKind;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default server port
const DEFAULT_PORT: u16 = 8096;

/// Default request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Default hosted inference API base URL
const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Default sentiment analysis model
const DEFAULT_SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// Default response generation model
const DEFAULT_GENERATION_MODEL: &str = "microsoft/DialoGPT-medium";

/// Default speech synthesis model
const DEFAULT_SPEECH_MODEL: &str = "facebook/mms-tts-eng";

/// Environment variable that overrides the hosted API token
const TOKEN_ENV_VAR: &str = "HF_API_TOKEN";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct HostedConfig {
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub sentiment_model: Option<String>,
    #[serde(default)]
    pub generation_model: Option<String>,
    #[serde(default)]
    pub speech_model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_speech_enabled")]
    pub enabled: bool,
    #[serde(default = "default_delivery")]
    pub delivery: String,
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_speech_enabled(),
            delivery: default_delivery(),
            audio_dir: default_audio_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_speech_enabled() -> bool {
    true
}

fn default_delivery() -> String {
    "data-uri".to_string()
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("audio")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    pub backend: String,
    #[serde(default)]
    pub hosted: HostedConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub request: RequestConfig,
}

/// Application configuration loaded from TOML files
///
/// All configuration values are loaded and validated at startup to ensure
/// the application fails fast if misconfigured (JPL Rule 24).
#[derive(Debug, Clone)]
pub struct Config {
    /// Inference backend kind (hosted or lexicon)
    pub backend: BackendKind,

    /// API token for the hosted backend
    pub api_token: Option<String>,

    /// Hosted inference API base URL
    pub inference_base_url: String,

    /// Model id for sentiment analysis
    pub sentiment_model: String,

    /// Model id for response generation
    pub generation_model: String,

    /// Model id for speech synthesis
    pub speech_model: String,

    /// Whether replies are synthesized to speech
    pub speech_enabled: bool,

    /// How synthesized audio reaches the client
    pub delivery: DeliveryMode,

    /// Directory for persisted audio clips
    pub audio_dir: PathBuf,

    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Logging level
    pub log_level: String,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Load configuration from TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The TOML file cannot be read or parsed
    /// - The backend or delivery value is not recognized
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;

        let config: TomlConfig =
            toml::from_str(&content).context("Failed to parse TOML configuration")?;

        let backend = BackendKind::from_str(&config.backend)
            .context("Invalid backend value. Must be one of: hosted, lexicon")?;

        let delivery = DeliveryMode::from_str(&config.speech.delivery)
            .context("Invalid delivery value. Must be one of: data-uri, file")?;

        Ok(Config {
            backend,
            api_token: config.hosted.api_token,
            inference_base_url: config
                .hosted
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            sentiment_model: config
                .hosted
                .sentiment_model
                .unwrap_or_else(|| DEFAULT_SENTIMENT_MODEL.to_string()),
            generation_model: config
                .hosted
                .generation_model
                .unwrap_or_else(|| DEFAULT_GENERATION_MODEL.to_string()),
            speech_model: config
                .hosted
                .speech_model
                .unwrap_or_else(|| DEFAULT_SPEECH_MODEL.to_string()),
            speech_enabled: config.speech.enabled,
            delivery,
            audio_dir: config.speech.audio_dir,
            host: config.server.host,
            port: config.server.port,
            log_level: config.server.log_level,
            request_timeout: config.request.request_timeout,
        })
    }

    /// Load configuration from environment and config file
    ///
    /// Looks for config.toml in current directory by default. A non-empty
    /// HF_API_TOKEN environment variable overrides any token in the file,
    /// so credentials never have to live on disk.
    pub fn from_env() -> Result<Self> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let config = Self::from_file(config_path)?;
        Ok(config.with_token_override(std::env::var(TOKEN_ENV_VAR).ok()))
    }

    /// Apply an environment-supplied token over the file's, when present
    /// and non-empty
    fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.api_token = Some(token);
        }
        self
    }

    /// Validate that credentials required by the backend are present
    ///
    /// The hosted backend needs a non-empty API token. The lexicon backend
    /// runs fully offline and needs none.
    pub fn validate_credentials(&self) -> bool {
        match self.backend {
            BackendKind::Hosted => self
                .api_token
                .as_ref()
                .is_some_and(|token| !token.is_empty()),
            BackendKind::Lexicon => true,
        }
    }
}
