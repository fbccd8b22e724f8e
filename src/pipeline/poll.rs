//! Poll loop and dedup controller.
//!
//! One cycle: fetch → validate → format → notify, then a fixed sleep. Any
//! failure short-circuits to the error path, which reports the failure at
//! most once per distinct message and leaves the cursor untouched.
//!
//! Two dedup slots remember the last "nothing new" notice and the last
//! failure notice. A message equal to its slot is not re-sent. Slots are
//! overwritten, never cleared. Status-change messages are never deduped.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::pipeline::format::{NOTHING_NEW_MESSAGE, failure_message, format_status};
use crate::pipeline::validate::extract;
use crate::services::{HomeworkSource, MessageChannel, Notifier};

/// What a single cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Status changes were found and handed to the notifier
    Reported { sent: usize, failed: usize },
    /// No changes since the cursor; `notified` is false when deduped or undelivered
    NothingNew { notified: bool },
    /// The cycle failed; `notified` is false when deduped or undelivered
    Failed { message: String, notified: bool },
}

/// Drives the poll-check-notify cycle.
pub struct PollLoop<S, C> {
    source: S,
    notifier: Notifier<C>,
    interval: Duration,
    cursor: i64,
    last_empty_message: Option<String>,
    last_error_message: Option<String>,
}

impl<S: HomeworkSource, C: MessageChannel> PollLoop<S, C> {
    /// Create a loop whose cursor starts at the current time.
    pub fn new(source: S, notifier: Notifier<C>, interval: Duration) -> Self {
        Self {
            source,
            notifier,
            interval,
            cursor: Utc::now().timestamp(),
            last_empty_message: None,
            last_error_message: None,
        }
    }

    /// Start polling from `cursor` instead of now.
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    /// Timestamp the next fetch starts from.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Run cycles until `shutdown` resolves.
    ///
    /// Sleeps the same interval after every cycle. Shutdown may interrupt
    /// either a cycle or the sleep.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        log::info!(
            "Polling every {}s starting from {}",
            self.interval.as_secs(),
            self.cursor
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                outcome = self.run_cycle() => log::debug!("Cycle finished: {outcome:?}"),
            }

            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        log::info!("Poll loop stopped at cursor {}", self.cursor);
    }

    /// Execute exactly one cycle, without the trailing sleep.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.check().await {
            Ok(outcome) => outcome,
            Err(error) => self.report_failure(&error).await,
        }
    }

    async fn check(&mut self) -> Result<CycleOutcome> {
        let raw = self.source.fetch(self.cursor).await?;
        let response = extract(&raw)?;

        if response.homeworks.is_empty() {
            let notified = notify_unless_repeated(
                &self.notifier,
                &mut self.last_empty_message,
                NOTHING_NEW_MESSAGE,
            )
            .await;
            self.cursor = response.current_date;
            return Ok(CycleOutcome::NothingNew { notified });
        }

        // Format everything first so a bad record sends nothing.
        let messages = response
            .homeworks
            .iter()
            .map(format_status)
            .collect::<Result<Vec<_>>>()?;

        let mut sent = 0;
        for message in &messages {
            if self.notifier.notify(message).await {
                sent += 1;
            }
        }

        self.cursor = response.current_date;
        Ok(CycleOutcome::Reported {
            sent,
            failed: messages.len() - sent,
        })
    }

    async fn report_failure(&mut self, error: &AppError) -> CycleOutcome {
        let message = failure_message(error);
        log::error!("{message}");

        let notified =
            notify_unless_repeated(&self.notifier, &mut self.last_error_message, &message).await;
        CycleOutcome::Failed { message, notified }
    }
}

/// Notify unless `message` equals the slot, then remember it.
///
/// Returns whether the message was delivered. The slot is updated after the
/// attempt whether or not delivery succeeded.
async fn notify_unless_repeated<C: MessageChannel>(
    notifier: &Notifier<C>,
    slot: &mut Option<String>,
    message: &str,
) -> bool {
    if slot.as_deref() == Some(message) {
        log::debug!("Suppressing repeated message \"{message}\"");
        return false;
    }

    let delivered = notifier.notify(message).await;
    *slot = Some(message.to_string());
    delivered
}
