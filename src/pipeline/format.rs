//! Notification message templates.

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::HomeworkRecord;

/// Sent when a poll returns no status changes.
pub const NOTHING_NEW_MESSAGE: &str = "No new homework statuses to review.";

/// Build the status-change message for one raw homework record.
pub fn format_status(record: &Value) -> Result<String> {
    let record = HomeworkRecord::try_from(record)?;
    Ok(format!(
        "Status changed for \"{}\". {}",
        record.name,
        record.status.verdict()
    ))
}

/// Build the diagnostic message for a failed cycle.
pub fn failure_message(error: &AppError) -> String {
    format!("Program failure: {error}")
}
