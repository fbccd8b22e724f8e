// src/config.rs

//! Configuration loading utilities.
//!
//! Tunables come from a TOML file and fall back to defaults. The three
//! secrets come from the environment and are mandatory.

use std::fmt;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Environment variable holding the homework API OAuth token.
pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
/// Environment variable holding the destination chat id.
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Credentials required before the poll loop may start.
#[derive(Clone)]
pub struct Secrets {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: String,
}

impl Secrets {
    /// Read secrets from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read secrets through an arbitrary lookup.
    ///
    /// Empty or whitespace-only values count as missing. Every missing name
    /// is reported, not just the first.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let practicum_token = read(PRACTICUM_TOKEN);
        let telegram_token = read(TELEGRAM_TOKEN);
        let chat_id = read(TELEGRAM_CHAT_ID);

        if !missing.is_empty() {
            return Err(AppError::MissingSecrets(missing));
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            chat_id,
        })
    }
}

// Tokens must never reach the logs.
impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("practicum_token", &"***")
            .field("telegram_token", &"***")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Load the TOML config (falling back to defaults) and validate it.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path);
    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid config {}: {e}", path.display())))?;
    Ok(config)
}

/// Load and validate both the config file and the secrets.
pub fn load_all(config_path: &Path) -> Result<(Config, Secrets)> {
    let config = load_config(config_path)?;
    let secrets = Secrets::from_env()?;
    Ok((config, secrets))
}
