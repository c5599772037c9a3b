//! Signed-in user record and auth-state change subscriptions.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Weak};
use tracing::debug;

/// User record as asserted by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable provider identifier.
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

impl User {
    pub fn display_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or("User")
    }

    /// "Ada Lovelace" -> "AL"; "U" when there is no name.
    pub fn initials(&self) -> String {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name
                .split_whitespace()
                .filter_map(|part| part.chars().next())
                .flat_map(char::to_uppercase)
                .collect(),
            _ => "U".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChange {
    SignedIn(User),
    SignedOut(User),
}

type Listener = Box<dyn Fn(&AuthChange) + Send + Sync>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    by_id: BTreeMap<u64, Listener>,
}

/// Fan-out point for auth changes. Cloning shares the same listener set.
#[derive(Clone, Default)]
pub struct AuthEvents {
    inner: Arc<Mutex<Listeners>>,
}

impl AuthEvents {
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AuthChange) + Send + Sync + 'static,
    {
        let mut guard = match self.inner.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.next_id += 1;
        let id = guard.next_id;
        guard.by_id.insert(id, Box::new(listener));
        debug!(id, "auth listener subscribed");

        Subscription {
            id,
            listeners: Arc::downgrade(&self.inner),
        }
    }

    pub fn emit(&self, change: &AuthChange) {
        let guard = match self.inner.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        for listener in guard.by_id.values() {
            listener(change);
        }
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.inner.lock().map(|g| g.by_id.len()).unwrap_or(0)
    }
}

/// Live auth-change subscription. Detaches on `unsubscribe` or drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };
        let mut guard = match listeners.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.by_id.remove(&self.id).is_some() {
            debug!(id = self.id, "auth listener unsubscribed");
        }
    }
}
