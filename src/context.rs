// context.rs
use crate::auth::{AuthChange, SessionStore, Subscription};
use crate::config::AppConfig;
use crate::listings::{BackendClient, FetchError, ListingSource};
use crate::notifications::{NotificationEnabler, TopicSubscriber};
use std::sync::Arc;
use tracing::info;

/// Everything a request handler needs. Built once at startup and shared by
/// reference across workers.
pub struct AppContext {
    pub config: AppConfig,
    pub listings: Arc<dyn ListingSource>,
    pub subscriber: Arc<dyn TopicSubscriber>,
    pub sessions: SessionStore,
    pub enabler: NotificationEnabler,
    auth_log: Subscription,
}

impl AppContext {
    /// Backend client, then sessions, then the notification enabler, then
    /// the auth-change log.
    pub fn from_config(config: AppConfig) -> Result<Self, FetchError> {
        let backend = Arc::new(BackendClient::new(&config.backend)?);
        info!(api_url = %backend.base_url(), "backend client ready");

        let listings: Arc<dyn ListingSource> = backend.clone();
        let subscriber: Arc<dyn TopicSubscriber> = backend;
        Ok(Self::new(config, listings, subscriber))
    }

    pub fn new(
        config: AppConfig,
        listings: Arc<dyn ListingSource>,
        subscriber: Arc<dyn TopicSubscriber>,
    ) -> Self {
        let sessions = SessionStore::new(config.session_ttl_secs);
        let enabler = NotificationEnabler::new(&config.notifications);
        let auth_log = sessions.subscribe(log_auth_change);

        Self {
            config,
            listings,
            subscriber,
            sessions,
            enabler,
            auth_log,
        }
    }

    /// Detach the auth-change log once the server has stopped.
    pub fn shutdown(self) {
        self.auth_log.unsubscribe();
        info!("auth listener detached");
    }
}

fn log_auth_change(change: &AuthChange) {
    match change {
        AuthChange::SignedIn(user) => info!(uid = %user.uid, "auth state: signed in"),
        AuthChange::SignedOut(user) => info!(uid = %user.uid, "auth state: signed out"),
    }
}
