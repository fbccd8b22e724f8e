//! Homework API client.
//!
//! Performs the timestamped poll request and enforces the HTTP-success and
//! JSON-decoding contracts. No retries here; the poll loop owns retry policy.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use url::Url;

use crate::error::{AppError, Result};
use crate::services::HomeworkSource;

/// Client for the homework statuses endpoint.
pub struct PracticumClient {
    client: Client,
    endpoint: Url,
    token: String,
}

impl PracticumClient {
    /// Create a client for `endpoint` authorised with the OAuth `token`.
    pub fn new(client: Client, endpoint: Url, token: impl Into<String>) -> Self {
        Self {
            client,
            endpoint,
            token: token.into(),
        }
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        log::debug!("Requesting homework statuses from_date={from_date}");

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                let error = AppError::transport(e);
                log::error!("Homework API request failed: {error}");
                error
            })?;

        let status = response.status();
        if !status.is_success() {
            log::error!("Homework API returned {status} for from_date={from_date}");
            return Err(AppError::ApiStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            let error = AppError::transport(e);
            log::error!("Failed to read homework API response: {error}");
            error
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            log::error!("Homework API response is not valid JSON: {e}");
            AppError::from(e)
        })
    }
}
