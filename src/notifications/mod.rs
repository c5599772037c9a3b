//! Push notifications for new hackathons.
//!
//! The browser owns the permission prompt and the messaging token; the
//! backend owns topic fan-out. This module only sequences the two:
//! permission, then a token (retried), then a topic subscription.
//!
//! The page script runs the token retries itself, paced by the same
//! attempt count and delay, and reports how many attempts it made.

mod enable;

pub use enable::{EnableGeneration, EnableOutcome, EnableTicket, NotificationEnabler};

use serde_json::Value;
use std::cell::Cell;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TOPIC: &str = "new_hackathons";

#[derive(Debug, Error)]
pub enum PushError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Browser notification permission (`Notification.permission`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    Granted,
    Denied,
    /// The user dismissed the prompt without choosing.
    #[default]
    Default,
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "granted" => Ok(Permission::Granted),
            "denied" => Ok(Permission::Denied),
            "default" => Ok(Permission::Default),
            other => Err(format!("unknown permission: {other}")),
        }
    }
}

/// The device side of push messaging.
pub trait PushMessaging {
    fn request_permission(&self) -> Permission;

    /// `Ok(None)` means the messaging service had no token to give yet.
    fn acquire_token(&self) -> Result<Option<String>, PushError>;

    /// Pause before the next token attempt.
    fn wait(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Registers a device token for a topic with the backend.
pub trait TopicSubscriber: Send + Sync {
    fn subscribe(&self, token: &str, topic: &str) -> Result<Value, PushError>;
}

/// What the page script saw: the permission answer, how many token
/// attempts it made, and the token from the last one (if any).
///
/// As `PushMessaging` it replays those attempts in order: every attempt
/// before the last reported one had no token. The page already waited
/// between its attempts, so the replay never pauses.
#[derive(Debug, Clone, Default)]
pub struct BrowserReport {
    pub permission: Permission,
    pub token: Option<String>,
    pub attempts: u32,
    replayed: Cell<u32>,
}

impl BrowserReport {
    /// Parse an `application/x-www-form-urlencoded` body with `permission`,
    /// `token` and `attempts` fields. Missing or unknown values read as
    /// "not granted", "no token" and a single attempt.
    pub fn from_form(body: &str) -> Self {
        let mut report = BrowserReport {
            attempts: 1,
            ..Default::default()
        };
        for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
            match key.as_ref() {
                "permission" => report.permission = value.parse().unwrap_or_default(),
                "token" => {
                    let token = value.trim();
                    report.token = (!token.is_empty()).then(|| token.to_string());
                }
                "attempts" => report.attempts = value.trim().parse::<u32>().unwrap_or(1).max(1),
                _ => {}
            }
        }
        report
    }
}

impl PushMessaging for BrowserReport {
    fn request_permission(&self) -> Permission {
        self.permission
    }

    fn acquire_token(&self) -> Result<Option<String>, PushError> {
        let attempt = self.replayed.get() + 1;
        self.replayed.set(attempt);
        if attempt < self.attempts {
            Ok(None)
        } else {
            Ok(self.token.clone())
        }
    }

    fn wait(&self, _delay: Duration) {}
}
