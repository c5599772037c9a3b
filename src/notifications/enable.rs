use crate::config::NotificationConfig;
use crate::notifications::{Permission, PushMessaging, TopicSubscriber};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{info, warn};

pub const ENABLED_NOTICE: &str = "Notifications enabled!";
pub const FAILED_NOTICE: &str = "Failed to enable notifications. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnableOutcome {
    /// The user did not grant permission. Terminal, never retried.
    PermissionNotGranted(Permission),
    /// Every token attempt failed or came back empty.
    TokenUnavailable { attempts: u32 },
    /// A token was acquired. `subscribed` is false when the topic
    /// subscription call failed; the token is still good.
    Enabled { token: String, subscribed: bool },
}

impl EnableOutcome {
    pub fn is_enabled(&self) -> bool {
        matches!(self, EnableOutcome::Enabled { .. })
    }

    pub fn notice(&self) -> &'static str {
        if self.is_enabled() {
            ENABLED_NOTICE
        } else {
            FAILED_NOTICE
        }
    }
}

/// Runs the permission → token → topic sequence.
#[derive(Debug, Clone)]
pub struct NotificationEnabler {
    max_attempts: u32,
    retry_delay: Duration,
    topic: String,
}

impl NotificationEnabler {
    pub fn new(cfg: &NotificationConfig) -> Self {
        Self {
            max_attempts: cfg.token_attempts.max(1),
            retry_delay: cfg.retry_delay,
            topic: cfg.topic.clone(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn enable(
        &self,
        messaging: &dyn PushMessaging,
        subscriber: &dyn TopicSubscriber,
    ) -> EnableOutcome {
        let permission = messaging.request_permission();
        if permission != Permission::Granted {
            info!(?permission, "notification permission not granted");
            return EnableOutcome::PermissionNotGranted(permission);
        }

        let Some(token) = self.acquire_token(messaging) else {
            return EnableOutcome::TokenUnavailable {
                attempts: self.max_attempts,
            };
        };

        let subscribed = match subscriber.subscribe(&token, &self.topic) {
            Ok(_) => {
                info!(topic = %self.topic, "subscribed device to topic");
                true
            }
            Err(e) => {
                warn!(topic = %self.topic, error = %e, "error subscribing to topic");
                false
            }
        };

        EnableOutcome::Enabled { token, subscribed }
    }

    /// Fixed delay between attempts, none after the last one.
    fn acquire_token(&self, messaging: &dyn PushMessaging) -> Option<String> {
        for attempt in 1..=self.max_attempts {
            match messaging.acquire_token() {
                Ok(Some(token)) => return Some(token),
                Ok(None) => warn!(attempt, "no messaging token available"),
                Err(e) => warn!(attempt, error = %e, "messaging token request failed"),
            }

            if attempt < self.max_attempts {
                messaging.wait(self.retry_delay);
            }
        }

        warn!(attempts = self.max_attempts, "giving up on messaging token");
        None
    }
}

/// Identifies one enable attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnableTicket(u64);

/// Orders overlapping enable attempts.
///
/// Only the most recently *issued* attempt may record its result; an older
/// attempt that finishes late is ignored.
#[derive(Debug, Default)]
pub struct EnableGeneration {
    latest: AtomicU64,
}

impl EnableGeneration {
    pub fn begin(&self) -> EnableTicket {
        EnableTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: EnableTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
