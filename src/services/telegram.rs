//! Telegram Bot API delivery channel.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result, describe};
use crate::services::MessageChannel;

/// Sends messages to one chat through the Bot API `sendMessage` method.
pub struct TelegramChannel {
    client: Client,
    api_base: Url,
    token: String,
    chat_id: String,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Envelope every Bot API response is wrapped in.
#[derive(Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramChannel {
    /// Create a channel for `chat_id` using the bot `token`.
    pub fn new(
        client: Client,
        api_base: Url,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base,
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    fn method_url(&self, method: &str) -> Result<Url> {
        let base = self.api_base.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/bot{}/{method}", self.token))?)
    }
}

#[async_trait]
impl MessageChannel for TelegramChannel {
    async fn send(&self, text: &str) -> Result<()> {
        let url = self.method_url("sendMessage")?;
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        // The token is part of the URL, so errors are stripped of it.
        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::delivery(describe(&e.without_url())))?;

        let status = response.status();
        let reply: Option<ApiReply> = response.json().await.ok();

        match reply {
            Some(ApiReply { ok: true, .. }) if status.is_success() => Ok(()),
            Some(ApiReply {
                description: Some(description),
                ..
            }) => Err(AppError::delivery(format!("{status}: {description}"))),
            _ => Err(AppError::delivery(format!("Telegram answered {status}"))),
        }
    }
}
