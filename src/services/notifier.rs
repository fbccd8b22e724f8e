//! Failure-absorbing delivery wrapper.

use crate::services::MessageChannel;

/// Delivers messages and swallows delivery failures.
///
/// The poll loop reports its own errors through this same channel, so a
/// broken channel must never turn into another loop error.
pub struct Notifier<C> {
    channel: C,
}

impl<C: MessageChannel> Notifier<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Send `message`, returning whether it was delivered.
    pub async fn notify(&self, message: &str) -> bool {
        match self.channel.send(message).await {
            Ok(()) => {
                log::info!("Bot sent message \"{message}\"");
                true
            }
            Err(error) => {
                log::error!("Failed to send message \"{message}\": {error}");
                false
            }
        }
    }

    #[cfg(test)]
    pub fn channel(&self) -> &C {
        &self.channel
    }
}
