// config.rs
use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
#[error("invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the hackathon API, e.g. "http://localhost:8000/api".
    pub api_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub topic: String,
    pub token_attempts: u32,
    pub retry_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub workers: usize,
    pub backend: BackendConfig,
    pub notifications: NotificationConfig,
    pub session_ttl_secs: i64,
    /// Public VAPID key handed to the page's messaging script.
    pub vapid_key: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. `load` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vapid_key = lookup("FIREBASE_VAPID_KEY").filter(|k| !k.trim().is_empty());
        if vapid_key.is_none() {
            info!("FIREBASE_VAPID_KEY not set, push notifications disabled in the page");
        }

        Ok(Self {
            bind_addr: try_load(&lookup, "HACKRADAR_BIND", "127.0.0.1:3000")?,
            workers: try_load(&lookup, "HACKRADAR_WORKERS", "8")?,
            backend: BackendConfig {
                api_url: try_load(&lookup, "API_URL", "http://localhost:8000/api")?,
                timeout: Duration::from_secs(try_load(
                    &lookup,
                    "HACKRADAR_HTTP_TIMEOUT_SECS",
                    "30",
                )?),
            },
            notifications: NotificationConfig {
                topic: try_load(&lookup, "NOTIFY_TOPIC", crate::notifications::DEFAULT_TOPIC)?,
                token_attempts: try_load(&lookup, "NOTIFY_TOKEN_ATTEMPTS", "3")?,
                retry_delay: Duration::from_millis(try_load(
                    &lookup,
                    "NOTIFY_RETRY_DELAY_MS",
                    "1000",
                )?),
            },
            session_ttl_secs: try_load(&lookup, "HACKRADAR_SESSION_TTL_SECS", "604800")?,
            vapid_key,
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.trim().parse().map_err(|e: T::Err| ConfigError {
        key,
        value: value.clone(),
        reason: e.to_string(),
    })
}
