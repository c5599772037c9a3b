// client.rs
use crate::config::BackendConfig;
use crate::listings::model::Listing;
use crate::notifications::{PushError, TopicSubscriber};
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("hackradar/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("backend returned {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Where the listing snapshot comes from.
pub trait ListingSource: Send + Sync {
    fn fetch_listings(&self) -> Result<Vec<Listing>, FetchError>;
}

#[derive(Serialize)]
struct SubscribePayload<'a> {
    token: &'a str,
    topic: &'a str,
}

/// Blocking client for the hackathon backend API.
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(cfg: &BackendConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: cfg.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl ListingSource for BackendClient {
    fn fetch_listings(&self) -> Result<Vec<Listing>, FetchError> {
        let url = self.url("hackathons");
        let start = Instant::now();

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "listing fetch rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let listings: Vec<Listing> = resp
            .json()
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!(
            count = listings.len(),
            elapsed = ?start.elapsed(),
            "fetched listings"
        );
        Ok(listings)
    }
}

impl TopicSubscriber for BackendClient {
    fn subscribe(&self, token: &str, topic: &str) -> Result<Value, PushError> {
        let url = self.url("notifications/subscribe");

        let resp = self
            .client
            .post(&url)
            .json(&SubscribePayload { token, topic })
            .send()
            .map_err(|e| PushError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            warn!(%url, status = status.as_u16(), %body, "topic subscription rejected");
            return Err(PushError::Status(status.as_u16()));
        }

        // Some backends answer 2xx with an empty body.
        let text = resp
            .text()
            .map_err(|e| PushError::Transport(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| PushError::Decode(e.to_string()))
    }
}
