// src/models/mod.rs

//! Domain models for the notifier.

mod config;
mod homework;

// Re-export all public types
pub use config::{ApiConfig, Config, HttpConfig, PollConfig, TelegramConfig};
pub use homework::{HomeworkRecord, PollResponse, StatusCode};
