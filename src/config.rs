//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! CORS headers, upstream defaults, logging format and default paths.
//! `AppConfig` is the root configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// CORS
// =============================================================================
// The service is called directly from browser frontends hosted elsewhere, so
// every response carries an open allow-origin header. Only the generate
// endpoint advertises methods and headers for preflight.

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "POST, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization";

// =============================================================================
// Upstream Completion API
// =============================================================================

/// Base URL of the chat-completion API
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.openai.com/v1";

/// Path appended to the base URL for chat completions
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Model used when none is configured
pub const DEFAULT_UPSTREAM_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature sent with every request
pub const DEFAULT_UPSTREAM_TEMPERATURE: f32 = 0.7;

/// Environment variable holding the upstream API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Package name, used as the log target in the default filter
pub const CRATE_NAME: &str = "lesson_planner";

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=debug,tower_http=debug", CRATE_NAME);

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Default HTTP bind host
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default HTTP bind port
pub const DEFAULT_HTTP_PORT: u16 = 3000;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Upstream completion API settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }
}

/// Settings for the chat-completion API.
///
/// When no API key is configured (neither here nor in `OPENAI_API_KEY`) the
/// service runs in mock mode and never contacts the upstream.
#[derive(Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "UpstreamConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "UpstreamConfig::default_model")]
    pub model: String,
    #[serde(default = "UpstreamConfig::default_temperature")]
    pub temperature: f32,
    /// API key for bearer authentication
    pub api_key: Option<String>,
    /// Client-wide request timeout; unset means no explicit timeout
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            model: Self::default_model(),
            temperature: Self::default_temperature(),
            api_key: None,
            timeout_seconds: None,
        }
    }
}

impl UpstreamConfig {
    fn default_base_url() -> String {
        DEFAULT_UPSTREAM_BASE_URL.to_string()
    }

    fn default_model() -> String {
        DEFAULT_UPSTREAM_MODEL.to_string()
    }

    fn default_temperature() -> f32 {
        DEFAULT_UPSTREAM_TEMPERATURE
    }

    /// The configured API key, treating an empty string as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Full URL of the chat-completions endpoint
    pub fn completions_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        )
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration, falling back to built-in defaults when the file is
    /// absent. Used for the default path, where a missing file is expected.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply an API key from the environment, overriding the file value.
    pub fn apply_env_api_key(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|k| !k.is_empty()) {
            self.upstream.api_key = Some(key);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.model.trim().is_empty() {
            return Err(ConfigError::Validation(
                "upstream.model must not be empty".to_string(),
            ));
        }

        let base = &self.upstream.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "upstream.base_url must be an http(s) URL, got '{}'",
                base
            )));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got '{}'",
                self.logging.format
            )));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
