//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
///
/// Holds tunables only. Tokens and the chat id come from the environment,
/// see [`crate::config::Secrets`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Homework API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Telegram Bot API settings
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Poll loop settings
    #[serde(default)]
    pub poll: PollConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::config("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::config("http.timeout_secs must be > 0"));
        }
        if self.poll.retry_secs == 0 {
            return Err(AppError::config("poll.retry_secs must be > 0"));
        }
        self.api.endpoint_url()?;
        self.telegram.api_base_url()?;
        Ok(())
    }
}

/// HTTP client settings shared by both remote services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Homework API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Homework statuses endpoint
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,
}

impl ApiConfig {
    /// Parse the endpoint as an absolute http(s) URL.
    pub fn endpoint_url(&self) -> Result<Url> {
        parse_http_url("api.endpoint", &self.endpoint)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
        }
    }
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API base URL, without the `/bot<token>` part
    #[serde(default = "defaults::api_base")]
    pub api_base: String,
}

impl TelegramConfig {
    /// Parse the API base as an absolute http(s) URL.
    pub fn api_base_url(&self) -> Result<Url> {
        parse_http_url("telegram.api_base", &self.api_base)
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::api_base(),
        }
    }
}

/// Poll loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds to sleep after every cycle, successful or not
    #[serde(default = "defaults::retry")]
    pub retry_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            retry_secs: defaults::retry(),
        }
    }
}

fn parse_http_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::config(format!(
            "{field} must use http or https, got {other:?}"
        ))),
    }
}

mod defaults {
    pub fn user_agent() -> String {
        concat!("homework-bot/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn endpoint() -> String {
        "https://practicum.yandex.ru/api/user_api/homework_statuses/".into()
    }
    pub fn api_base() -> String {
        "https://api.telegram.org".into()
    }
    pub fn retry() -> u64 {
        600
    }
}
