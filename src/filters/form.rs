//! Filter form controller.
//!
//! Owns the editable copy of the filter selection and is the only writer of
//! the address-bar query. Data flows one way: `apply` writes the query and
//! notifies the listener; an externally changed query is folded back into
//! the working copy at most once per change and never written back.

use crate::filters::query;
use crate::filters::state::{DateRange, FilterState, Location, Platform};
use tracing::debug;

/// Read/write view of the page location.
pub trait AddressBar {
    /// Current query string, with or without the leading `?`.
    fn query(&self) -> String;

    /// Request navigation to `target` (path plus optional query).
    fn navigate(&mut self, target: &str);
}

/// Receives every committed filter selection.
pub trait FilterListener {
    fn on_filter_change(&mut self, state: &FilterState);
}

impl<F> FilterListener for F
where
    F: FnMut(&FilterState),
{
    fn on_filter_change(&mut self, state: &FilterState) {
        self(state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPhase {
    /// Nothing has been read from the address bar yet.
    Uninitialized,
    /// `last_query` is the query last read from or written to the address bar.
    Synced { last_query: String },
}

/// The page the form lives on; `apply` navigates here.
pub const FILTER_PAGE: &str = "/";

pub struct FilterFormController<A, L> {
    address_bar: A,
    listener: L,
    working: FilterState,
    phase: SyncPhase,
}

impl<A: AddressBar, L: FilterListener> FilterFormController<A, L> {
    pub fn new(address_bar: A, listener: L) -> Self {
        Self {
            address_bar,
            listener,
            working: FilterState::default(),
            phase: SyncPhase::Uninitialized,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> &SyncPhase {
        &self.phase
    }

    #[cfg(test)]
    pub fn working(&self) -> &FilterState {
        &self.working
    }

    pub fn address_bar(&self) -> &A {
        &self.address_bar
    }

    /// Read the address bar. The first mount seeds the working copy; a
    /// later one folds in whatever changed since.
    pub fn mount(&mut self) -> &FilterState {
        let query = self.address_bar.query();
        self.observe_query(&query);
        &self.working
    }

    /// Decode `query` into the working copy and publish it once.
    ///
    /// Only the first call has any effect; after that the controller is
    /// `Synced` and external changes go through `observe_query`.
    pub fn initialize(&mut self, query: &str) -> &FilterState {
        if let SyncPhase::Synced { .. } = self.phase {
            debug!("filter form already initialized, ignoring");
            return &self.working;
        }

        self.working = query::decode(query);
        self.phase = SyncPhase::Synced {
            last_query: normalize(query).to_string(),
        };
        debug!(query = %normalize(query), "filter form initialized");
        self.listener.on_filter_change(&self.working);
        &self.working
    }

    /// Fold an externally changed query (back/forward, pasted link) into the
    /// working copy. Returns whether any field changed.
    pub fn observe_query(&mut self, query: &str) -> bool {
        if self.phase == SyncPhase::Uninitialized {
            self.initialize(query);
            return true;
        }

        let query = normalize(query);
        if let SyncPhase::Synced { last_query } = &self.phase {
            if last_query == query {
                return false;
            }
        }
        self.phase = SyncPhase::Synced {
            last_query: query.to_string(),
        };

        let decoded = query::decode(query);
        let mut changed = false;

        if self.working.search_term != decoded.search_term {
            self.working.search_term = decoded.search_term;
            changed = true;
        }
        if self.working.location != decoded.location {
            self.working.location = decoded.location;
            changed = true;
        }
        if self.working.source != decoded.source {
            self.working.source = decoded.source;
            changed = true;
        }
        if self.working.date_range != decoded.date_range {
            self.working.date_range = decoded.date_range;
            changed = true;
        }

        if changed {
            debug!(query, "filter form synced from address bar");
            self.listener.on_filter_change(&self.working);
        }
        changed
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.working.search_term = term.into();
    }

    pub fn set_location(&mut self, location: Location) {
        self.working.location = location;
    }

    pub fn set_source(&mut self, source: Platform) {
        self.working.source = source;
    }

    pub fn set_date_range(&mut self, date_range: DateRange) {
        self.working.date_range = date_range;
    }

    /// Apply whatever is currently in the editable fields.
    pub fn submit(&mut self) {
        let state = self.working.clone();
        self.apply(state);
    }

    /// Commit `state`: update the address bar, then notify the listener.
    pub fn apply(&mut self, state: FilterState) {
        let encoded = query::encode(&state);
        let target = query::href(FILTER_PAGE, &state);

        self.phase = SyncPhase::Synced {
            last_query: encoded,
        };
        self.address_bar.navigate(&target);
        self.working = state;

        debug!(target = %target, "filters applied");
        self.listener.on_filter_change(&self.working);
    }

    pub fn reset(&mut self) {
        self.apply(FilterState::default());
    }
}

fn normalize(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}

/// Address bar backed by an incoming HTTP request.
///
/// The query comes from the request URI; a navigation is recorded and turned
/// into a redirect by the router.
#[derive(Debug, Default)]
pub struct RequestAddressBar {
    query: String,
    navigation: Option<String>,
}

impl RequestAddressBar {
    pub fn new(query: Option<&str>) -> Self {
        Self {
            query: query.unwrap_or_default().to_string(),
            navigation: None,
        }
    }

    pub fn navigation(&self) -> Option<&str> {
        self.navigation.as_deref()
    }
}

impl AddressBar for RequestAddressBar {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn navigate(&mut self, target: &str) {
        self.navigation = Some(target.to_string());
        if let Some((_, query)) = target.split_once('?') {
            self.query = query.to_string();
        } else {
            self.query.clear();
        }
    }
}
