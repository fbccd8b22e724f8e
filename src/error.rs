// src/error.rs

//! Unified error handling for the notifier.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Result type alias for notifier operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// The first five variants fail a poll cycle; the loop reports them and
/// retries. The rest only occur at startup or inside the messaging channel.
#[derive(Error, Debug)]
pub enum AppError {
    /// Network-level failure talking to the homework API
    #[error("Transport error: {}", describe(.0))]
    Transport(#[source] reqwest::Error),

    /// Homework API answered with a non-success status
    #[error("API returned HTTP {status}")]
    ApiStatus { status: u16 },

    /// Response body is not valid JSON
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response or record does not have the expected shape
    #[error("Schema error: {0}")]
    Schema(String),

    /// Homework status outside the known set
    #[error("Unknown homework status: {0:?}")]
    UnknownStatus(String),

    /// Messaging channel refused or failed to deliver a message
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Required secrets are absent from the environment
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingSecrets(Vec<&'static str>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

/// Render an error followed by every cause in its `source()` chain.
///
/// reqwest's own message only names the failing stage ("error sending
/// request"); the actual cause (refused, timed out, DNS) lives in the chain.
pub fn describe(error: &(dyn StdError + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.ends_with(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

impl AppError {
    /// Create a transport error, stripping the request URL from the cause.
    pub fn transport(error: reqwest::Error) -> Self {
        Self::Transport(error.without_url())
    }

    /// Create a schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Create a delivery error.
    pub fn delivery(message: impl fmt::Display) -> Self {
        Self::Delivery(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_secrets_lists_every_name() {
        let err = AppError::MissingSecrets(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]);
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("error sending request")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn describe_includes_every_cause() {
        let refused = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        let timed_out = Outer(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "operation timed out",
        ));

        assert_eq!(describe(&refused), "error sending request: connection refused");
        assert_eq!(describe(&timed_out), "error sending request: operation timed out");
    }

    #[test]
    fn describe_without_source_is_plain_display() {
        let err = std::io::Error::other("boom");
        assert_eq!(describe(&err), "boom");
    }

    #[test]
    fn unknown_status_quotes_value() {
        let err = AppError::UnknownStatus("lost".into());
        assert_eq!(err.to_string(), "Unknown homework status: \"lost\"");
    }
}
