// Application configuration
//
// Built once at startup from environment variables and passed by value
// into the components that need it. No global/static config: tests
// construct their own AppConfig without process-wide side effects.

use std::time::Duration;

use thiserror::Error;

/// Default listening port for the backend server
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration validation error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// API key is not set at all
    #[error("DEEPSEEK_API_KEY is not set")]
    MissingApiKey,

    /// API key does not look like a DeepSeek key
    #[error("DEEPSEEK_API_KEY format is invalid (should start with \"sk-\")")]
    MalformedApiKey,
}

/// DeepSeek API configuration
#[derive(Debug, Clone)]
pub struct DeepSeekConfig {
    /// API key (bearer token)
    pub api_key: String,
    /// API base URL
    pub api_url: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens to generate per answer
    pub max_tokens: u32,
    /// Per-request timeout for the chat completion call
    pub timeout: Duration,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            temperature: 0.7,
            max_tokens: 600,
            timeout: Duration::from_secs(15),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the backend server listens on
    pub port: u16,
    /// Allowed CORS origins; empty means allow any origin
    /// (the kiosk web build is served from file://)
    pub allowed_origins: Vec<String>,
    /// DeepSeek API configuration
    pub deepseek: DeepSeekConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allowed_origins: Vec::new(),
            deepseek: DeepSeekConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables.
    ///
    /// Reads `PORT`, `DEEPSEEK_API_KEY`, `DEEPSEEK_API_URL` and
    /// `ALLOWED_ORIGINS` (comma separated). Unset variables fall back
    /// to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(port) = std::env::var("PORT").ok().and_then(|v| v.parse().ok()) {
            config.port = port;
        }

        if let Ok(key) = std::env::var("DEEPSEEK_API_KEY") {
            config.deepseek.api_key = key;
        }

        if let Ok(url) = std::env::var("DEEPSEEK_API_URL") {
            if !url.is_empty() {
                config.deepseek.api_url = url;
            }
        }

        if let Ok(origins) = std::env::var("ALLOWED_ORIGINS") {
            config.allowed_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }

        config
    }

    /// Validate the configuration.
    ///
    /// The server must not start serving with a missing or visibly
    /// malformed API key; callers are expected to fail loudly on `Err`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deepseek.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if !self.deepseek.api_key.starts_with("sk-") {
            return Err(ConfigError::MalformedApiKey);
        }
        Ok(())
    }
}
