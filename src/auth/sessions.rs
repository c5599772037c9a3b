// src/auth/sessions.rs
use crate::auth::identity::{AuthChange, AuthEvents, Subscription, User};
use crate::auth::token::{generate_session_token, hash_token};
use crate::notifications::{EnableGeneration, EnableTicket};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

pub const DEFAULT_SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7; // 7 days

struct Session {
    user: User,
    expires_at: i64,
    notifications_enabled: bool,
    enables: Arc<EnableGeneration>,
}

/// In-memory sessions keyed by token hash. Raw tokens live only in the
/// client's cookie.
pub struct SessionStore {
    ttl_secs: i64,
    sessions: RwLock<HashMap<[u8; 32], Session>>,
    events: AuthEvents,
}

impl SessionStore {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            ttl_secs,
            sessions: RwLock::new(HashMap::new()),
            events: AuthEvents::default(),
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Register for sign-in / sign-out changes.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AuthChange) + Send + Sync + 'static,
    {
        self.events.subscribe(listener)
    }

    /// Returns the raw token for the client's cookie.
    pub fn sign_in(&self, user: User, now: i64) -> String {
        let raw_token = generate_session_token();
        let session = Session {
            user: user.clone(),
            expires_at: now + self.ttl_secs,
            notifications_enabled: false,
            enables: Arc::new(EnableGeneration::default()),
        };

        {
            let mut sessions = self.write();
            sessions.retain(|_, s| s.expires_at > now);
            sessions.insert(hash_token(&raw_token), session);
        }

        debug!(uid = %user.uid, "session created");
        self.events.emit(&AuthChange::SignedIn(user));
        raw_token
    }

    pub fn current_user(&self, raw_token: &str, now: i64) -> Option<User> {
        self.read()
            .get(&hash_token(raw_token))
            .filter(|s| s.expires_at > now)
            .map(|s| s.user.clone())
    }

    /// Revokes the session. Returns the user it belonged to, if any.
    pub fn sign_out(&self, raw_token: &str) -> Option<User> {
        let removed = self.write().remove(&hash_token(raw_token))?;
        debug!(uid = %removed.user.uid, "session revoked");
        self.events.emit(&AuthChange::SignedOut(removed.user.clone()));
        Some(removed.user)
    }

    pub fn notifications_enabled(&self, raw_token: &str, now: i64) -> bool {
        self.read()
            .get(&hash_token(raw_token))
            .filter(|s| s.expires_at > now)
            .is_some_and(|s| s.notifications_enabled)
    }

    /// Start an enable attempt for this session. `None` when the session
    /// is unknown or expired.
    pub fn begin_enable(&self, raw_token: &str, now: i64) -> Option<EnableTicket> {
        let enables = self
            .read()
            .get(&hash_token(raw_token))
            .filter(|s| s.expires_at > now)
            .map(|s| Arc::clone(&s.enables))?;
        Some(enables.begin())
    }

    /// Record the result of an enable attempt. A ticket superseded by a
    /// later `begin_enable` is dropped and `false` is returned.
    pub fn finish_enable(&self, raw_token: &str, ticket: EnableTicket, enabled: bool) -> bool {
        let mut sessions = self.write();
        let Some(session) = sessions.get_mut(&hash_token(raw_token)) else {
            return false;
        };
        if !session.enables.is_current(ticket) {
            debug!(uid = %session.user.uid, "ignoring stale notification result");
            return false;
        }
        session.notifications_enabled = enabled;
        true
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<[u8; 32], Session>> {
        self.sessions.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<[u8; 32], Session>> {
        self.sessions.write().unwrap_or_else(|p| p.into_inner())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL_SECS)
    }
}
