//! Service layer for the notifier.
//!
//! This module contains the remote collaborators of the poll loop:
//! - Homework API client (`PracticumClient`)
//! - Telegram delivery channel (`TelegramChannel`)
//! - Failure-absorbing delivery wrapper (`Notifier`)

mod notifier;
mod practicum;
mod telegram;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use notifier::Notifier;
pub use practicum::PracticumClient;
pub use telegram::TelegramChannel;

/// Source of homework status updates.
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch every status change since `from_date` as decoded JSON.
    ///
    /// Shape is not checked here; see [`crate::pipeline::extract`].
    async fn fetch(&self, from_date: i64) -> Result<Value>;
}

/// Outbound text channel to the single destination chat.
#[async_trait]
pub trait MessageChannel: Send + Sync {
    /// Deliver one message. Not idempotent.
    async fn send(&self, text: &str) -> Result<()>;
}
