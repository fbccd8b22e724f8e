//! Poll pipeline stages.
//!
//! - `extract`: Validate a decoded response and pull out its homework list
//! - `format_status`: Turn one homework record into a notification
//! - `PollLoop`: Drive fetch → validate → format → notify with dedup

pub mod format;
pub mod poll;
pub mod validate;

pub use format::{NOTHING_NEW_MESSAGE, failure_message, format_status};
pub use poll::{CycleOutcome, PollLoop};
pub use validate::extract;
